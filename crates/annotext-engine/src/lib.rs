//! # annotext-engine
//!
//! Rich inline text as a flat string plus typed character ranges
//! ("markups"): links, code, bold and italic.
//!
//! An element tree is flattened into an [`AnnotatedText`] by [`extract`],
//! edited as plain text ([`AnnotatedText::replace`],
//! [`AnnotatedText::substr`], [`AnnotatedText::append`], ...) with the
//! markup ranges kept consistent, and turned back into a tree by
//! [`render`]. The value persists as JSON.
//!
//! ```
//! use annotext_engine::{AnnotatedText, ExtractOptions, dom::Element, dom::Node};
//!
//! let paragraph = Node::from(
//!     Element::new("p")
//!         .text("The ")
//!         .child(Element::new("em").text("great "))
//!         .child(Element::new("code").text("Gatsby")),
//! );
//! let text = AnnotatedText::from_tree(&paragraph, &ExtractOptions::default()).unwrap();
//!
//! assert_eq!(text.text(), "The great Gatsby");
//! assert_eq!(text.to_string(), "<p>The <em>great </em><code>Gatsby</code></p>");
//! ```
//!
//! ## Modules
//!
//! - **`markup`**: markup types, canonical order and merging
//! - **`text`**: [`AnnotatedText`] and its editing operations
//! - **`tree`**: collaborator traits, extraction and rendering
//! - **`dom`**: reference tree implementation with HTML output
//! - **`invariants`**: panicking validator for tests

pub mod dom;
pub mod error;
pub mod invariants;
pub mod markup;
pub mod text;
pub mod tree;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use markup::{Markup, MarkupType};
pub use text::AnnotatedText;
pub use text::replace::{Literal, Occurrence, Replacement};
pub use text::slice::Appendix;
pub use tree::{
    Directive, ExtractOptions, NodeKind, StyleMode, TreeNode, TreeSink, extract, render,
};
