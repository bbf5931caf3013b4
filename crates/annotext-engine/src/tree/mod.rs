//! # Tree Conversion
//!
//! Moves content between a hierarchical element tree and an
//! [`AnnotatedText`](crate::AnnotatedText).
//!
//! The engine never owns a tree type of its own. It reads through
//! [`TreeNode`] and builds through [`TreeSink`]; [`crate::dom`] provides
//! the reference implementation of both.
//!
//! ## Modules
//!
//! - **`rules`**: which markups an element's tag and inline style declare
//! - **`extract`**: tree → annotated text
//! - **`render`**: annotated text → tree

pub mod extract;
pub mod render;
pub mod rules;

pub use extract::extract;
pub use render::render;
pub use rules::{Declared, Directive, ExtractOptions, StyleMode};

/// What a tree node is, as far as conversion cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// An element standing for a hard line break (`br`).
    LineBreak,
}

/// Read side of a tree.
pub trait TreeNode {
    fn kind(&self) -> NodeKind;

    /// Element tag name; `None` for text nodes.
    fn tag_name(&self) -> Option<&str>;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Value of an inline style property such as `font-weight`.
    fn style_property(&self, name: &str) -> Option<&str>;

    /// Child at `index`, `None` past the last child.
    fn child(&self, index: usize) -> Option<&Self>;

    /// Content of a text node; `None` for elements.
    fn text(&self) -> Option<&str>;
}

/// Write side of a tree.
///
/// Nodes are handed out detached and attached with
/// [`append_child`](Self::append_child). Rendering emits children before
/// their parent.
pub trait TreeSink {
    type Node;

    fn element(&mut self, tag: &str) -> Self::Node;

    fn text(&mut self, text: &str) -> Self::Node;

    fn line_break(&mut self) -> Self::Node;

    fn set_attribute(&mut self, node: &mut Self::Node, name: &str, value: &str);

    fn append_child(&mut self, parent: &mut Self::Node, child: Self::Node);
}
