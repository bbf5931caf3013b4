//! # annotext-html
//!
//! Reads inline HTML fragments into [`annotext_engine::dom`] trees so they
//! can be flattened into [`AnnotatedText`].
//!
//! ## Architecture Overview
//!
//! ```text
//! HTML → Lexer → Tokens → Parser → Element tree → extract → AnnotatedText
//!        (Logos)          (open-element stack)
//! ```
//!
//! The lexer ([`lexer`]) is lossless and knows nothing about nesting. The
//! parser ([`parser`]) keeps a stack of open elements and repairs the
//! usual inline-HTML sloppiness instead of failing.
//!
//! ## Example
//!
//! ```
//! use annotext_engine::ExtractOptions;
//!
//! let text = annotext_html::extract_html(
//!     "<p>Once <em>upon</em> a time</p>",
//!     &ExtractOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(text.text(), "Once upon a time");
//! assert_eq!(text.to_string(), "<p>Once <em>upon</em> a time</p>");
//! ```

pub mod lexer;
pub mod parser;

use annotext_engine::dom::{Element, Node};
use annotext_engine::{AnnotatedText, ExtractOptions};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("no element found in HTML input")]
    NoRootElement,

    #[error(transparent)]
    Extract(#[from] annotext_engine::Error),
}

/// Parses `html` as the content of a new `<tag>` element.
pub fn parse_fragment(tag: &str, html: &str) -> Element {
    parser::parse_nodes(html)
        .into_iter()
        .fold(Element::new(tag), |element, node| element.child(node))
}

/// Parses the first element of `html`, e.g. `<p>...</p>`. Anything around
/// it is dropped.
pub fn parse_element(html: &str) -> Result<Element, HtmlError> {
    parser::parse_nodes(html)
        .into_iter()
        .find_map(Node::into_element)
        .ok_or(HtmlError::NoRootElement)
}

/// Parses `html` as a single element when it is one (surrounding
/// whitespace aside), otherwise as the content of a new `<default_tag>`.
pub fn parse_root(default_tag: &str, html: &str) -> Element {
    let mut nodes = parser::parse_nodes(html);
    let mut significant = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !matches!(node, Node::Text(text) if text.trim().is_empty()));
    let lone_element = match (significant.next(), significant.next()) {
        (Some((index, Node::Element(_))), None) => Some(index),
        _ => None,
    };

    if let Some(element) = lone_element.and_then(|index| nodes.swap_remove(index).into_element()) {
        return element;
    }
    log::debug!("wrapping fragment in <{default_tag}>");
    nodes
        .into_iter()
        .fold(Element::new(default_tag), |element, node| element.child(node))
}

/// Parses the first element of `html` and extracts it.
pub fn extract_html(html: &str, options: &ExtractOptions) -> Result<AnnotatedText, HtmlError> {
    let root = Node::from(parse_element(html)?);
    Ok(AnnotatedText::from_tree(&root, options)?)
}
