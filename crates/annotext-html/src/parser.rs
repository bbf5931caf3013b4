//! Builds element trees from lexed HTML with an explicit open-element
//! stack. Forgiving in the way browsers are for inline content: end tags
//! with no open element are ignored, end tags close any elements opened
//! after their match, and elements still open at end of input are closed.

use annotext_engine::dom::{Element, Node};

use crate::lexer::{TokenKind, lex};

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A parsed start tag.
#[derive(Debug, PartialEq, Eq)]
struct StartTag {
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
}

impl StartTag {
    fn into_element(self) -> Element {
        self.attributes
            .into_iter()
            .fold(Element::new(self.name), |element, (name, value)| {
                element.attr(name, value)
            })
    }
}

fn tag_name(raw: &str) -> (String, &str) {
    let end = raw
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(raw.len());
    (raw[..end].to_ascii_lowercase(), &raw[end..])
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Parses `<name attr=value ...>` (the whole token, brackets included).
fn parse_start_tag(token: &str) -> StartTag {
    let inner = token.trim_start_matches('<');
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    let (name, mut rest) = tag_name(inner);
    let self_closing = rest.trim_end().ends_with('/');
    let mut attributes = Vec::new();

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }

        let name_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let attribute = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            None => String::new(),
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let body = &after[1..];
                        let close = body.find(quote).unwrap_or(body.len());
                        rest = body.get(close + 1..).unwrap_or("");
                        decode(&body[..close])
                    }
                    _ => {
                        let end = after
                            .find(|c: char| c.is_ascii_whitespace())
                            .unwrap_or(after.len());
                        rest = &after[end..];
                        decode(after[..end].trim_end_matches('/'))
                    }
                }
            }
        };

        if !attribute.is_empty() {
            attributes.push((attribute, value));
        }
    }

    StartTag {
        name,
        attributes,
        self_closing,
    }
}

fn parse_end_tag(token: &str) -> String {
    token
        .trim_start_matches("</")
        .trim_end_matches('>')
        .trim_end()
        .to_ascii_lowercase()
}

/// Elements opened but not yet closed, above the top-level node list.
#[derive(Default)]
struct OpenElements {
    top_level: Vec<Node>,
    open: Vec<Element>,
}

impl OpenElements {
    fn attach(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.push_child(node),
            None => self.top_level.push(node),
        }
    }

    fn close_top(&mut self) {
        if let Some(element) = self.open.pop() {
            self.attach(element.into());
        }
    }

    /// Closes the innermost open `tag` and everything opened after it.
    fn close(&mut self, tag: &str) {
        let Some(position) = self.open.iter().rposition(|e| e.tag() == tag) else {
            log::trace!("ignoring unmatched </{tag}>");
            return;
        };
        while self.open.len() > position {
            self.close_top();
        }
    }

    fn finish(mut self) -> Vec<Node> {
        if !self.open.is_empty() {
            log::trace!("closing {} unclosed element(s)", self.open.len());
        }
        while !self.open.is_empty() {
            self.close_top();
        }
        self.top_level
    }
}

/// Parses `html` into a list of top-level nodes.
pub fn parse_nodes(html: &str) -> Vec<Node> {
    let mut elements = OpenElements::default();

    for token in lex(html) {
        match token.kind {
            TokenKind::Text => {
                let text = decode(token.text);
                if !text.is_empty() {
                    elements.attach(text.into());
                }
            }
            TokenKind::StartTag => {
                let tag = parse_start_tag(token.text);
                if tag.self_closing || is_void(&tag.name) {
                    elements.attach(tag.into_element().into());
                } else {
                    elements.open.push(tag.into_element());
                }
            }
            TokenKind::EndTag => elements.close(&parse_end_tag(token.text)),
            TokenKind::Comment => {}
        }
    }

    elements.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn html(nodes: &[Node]) -> String {
        nodes.iter().map(Node::outer_html).collect()
    }

    #[rstest]
    #[case("<em>", "em", vec![], false)]
    #[case("<EM>", "em", vec![], false)]
    #[case("<br/>", "br", vec![], true)]
    #[case("<br />", "br", vec![], true)]
    #[case(r#"<a href="/x">"#, "a", vec![("href", "/x")], false)]
    #[case("<a href='/x'>", "a", vec![("href", "/x")], false)]
    #[case("<a href=/x>", "a", vec![("href", "/x")], false)]
    #[case("<a href=/x/>", "a", vec![("href", "/x")], true)]
    #[case("<input disabled>", "input", vec![("disabled", "")], false)]
    #[case(
        r#"<span  STYLE = "font-weight: bold"  class=x>"#,
        "span",
        vec![("style", "font-weight: bold"), ("class", "x")],
        false
    )]
    #[case(r#"<a href="/q?a=1&amp;b=2">"#, "a", vec![("href", "/q?a=1&b=2")], false)]
    #[case(r#"<a title="unterminated>"#, "a", vec![("title", "unterminated")], false)]
    fn parses_start_tags(
        #[case] token: &str,
        #[case] name: &str,
        #[case] attributes: Vec<(&str, &str)>,
        #[case] self_closing: bool,
    ) {
        let expected = StartTag {
            name: name.to_owned(),
            attributes: attributes
                .into_iter()
                .map(|(n, v)| (n.to_owned(), v.to_owned()))
                .collect(),
            self_closing,
        };
        assert_eq!(parse_start_tag(token), expected);
    }

    #[rstest]
    #[case("</em>", "em")]
    #[case("</EM >", "em")]
    #[case("</my-tag\n>", "my-tag")]
    fn parses_end_tags(#[case] token: &str, #[case] name: &str) {
        assert_eq!(parse_end_tag(token), name);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a <em>b</em> c", "a <em>b</em> c")]
    #[case("<em>a<strong>b</strong></em>", "<em>a<strong>b</strong></em>")]
    #[case("a<br>b", "a<br>b")]
    #[case("a<br/>b", "a<br>b")]
    #[case("a</em>b", "ab")]
    #[case("<em>a<strong>b</em>c", "<em>a<strong>b</strong></em>c")]
    #[case("<em>open", "<em>open</em>")]
    #[case("a<!-- hidden -->b", "ab")]
    #[case("&lt;tag&gt; &amp; more", "&lt;tag&gt; &amp; more")]
    #[case("caf&eacute;", "café")]
    #[case("1 < 2", "1 &lt; 2")]
    fn builds_trees(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(&parse_nodes(input)), expected);
    }

    #[test]
    fn decodes_text_entities() {
        let nodes = parse_nodes("a&nbsp;b");
        assert_eq!(nodes, vec![Node::from("a\u{a0}b")]);
    }

    #[test]
    fn keeps_attributes_in_order() {
        let nodes = parse_nodes(r#"<a href="/" style="font-style: italic">x</a>"#);
        let element = nodes[0].as_element().unwrap();
        assert_eq!(element.get_attribute("href"), Some("/"));
        assert_eq!(element.style_property("font-style"), Some("italic"));
        assert_eq!(element.text_content(), "x");
    }
}
