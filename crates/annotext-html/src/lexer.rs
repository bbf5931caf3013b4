//! # Lossless HTML Fragment Lexer
//!
//! Splits an inline HTML fragment into start tags, end tags, comments and
//! text runs. The lexer never interprets anything: attribute parsing and
//! entity decoding happen in the [`parser`](crate::parser).
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input belongs to exactly one token. A `<` that does
//! not open a well-formed tag comes back as [`TokenKind::Text`], so
//! concatenating the token texts reproduces the input:
//!
//! ```
//! use annotext_html::lexer::lex;
//!
//! let input = "a < b <em title='x > y'>c</em><!-- gone -->";
//! let tokens = lex(input);
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Public API
//!
//! - [`lex`]: tokens with their text slices
//! - [`lex_with_spans`]: the same plus byte ranges

use logos::{Lexer, Logos};

/// Token kinds of an inline HTML fragment.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attr="value" ...>`, optionally self-closing.
    #[regex(r#"<[A-Za-z][A-Za-z0-9:-]*([^<>"']|"[^"]*"|'[^']*')*>"#)]
    StartTag,

    /// `</name>`
    #[regex(r"</[A-Za-z][A-Za-z0-9:-]*[ \t\r\n]*>")]
    EndTag,

    /// `<!-- ... -->`, running to the end of input when unterminated.
    #[token("<!--", comment)]
    Comment,

    /// Character data up to the next `<`.
    #[regex(r"[^<]+")]
    Text,
}

fn comment(lex: &mut Lexer<'_, TokenKind>) {
    let rest = lex.remainder();
    let consumed = rest.find("-->").map_or(rest.len(), |end| end + 3);
    lex.bump(consumed);
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        // Logos error means a stray `<` - treat as TEXT
        let kind = result.unwrap_or(TokenKind::Text);
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
