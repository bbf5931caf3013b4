//! # Reference DOM
//!
//! A small owned element/text tree. It implements both [`TreeNode`] and,
//! through [`DomSink`], [`TreeSink`], so annotated text can be extracted
//! from and rendered into it without any other tree library.
//!
//! `br` elements are line breaks. Inline styles are read from the `style`
//! attribute on demand.

pub mod html;

use crate::error::Result;
use crate::text::AnnotatedText;
use crate::tree::{ExtractOptions, NodeKind, TreeNode, TreeSink, extract, render};

pub const LINE_BREAK_TAG: &str = "br";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn line_break() -> Self {
        Self::new(LINE_BREAK_TAG)
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_line_break(&self) -> bool {
        self.tag.eq_ignore_ascii_case(LINE_BREAK_TAG)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Attribute lookup; names compare case-insensitively.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Value of one property of the inline `style` attribute.
    ///
    /// Declarations are `name: value` pairs separated by `;`. Names compare
    /// case-insensitively; the last declaration of a property wins.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.get_attribute("style")?
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .filter(|(property, _)| property.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
            .last()
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => stack.extend(element.children.iter().rev()),
            }
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn into_element(self) -> Option<Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl TreeNode for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::Element(element) if element.is_line_break() => NodeKind::LineBreak,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        self.as_element().map(Element::tag)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.as_element()?.get_attribute(name)
    }

    fn style_property(&self, name: &str) -> Option<&str> {
        self.as_element()?.style_property(name)
    }

    fn child(&self, index: usize) -> Option<&Self> {
        self.as_element()?.children.get(index)
    }

    fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

/// Builds [`Node`]s for rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomSink;

impl TreeSink for DomSink {
    type Node = Node;

    fn element(&mut self, tag: &str) -> Node {
        Node::Element(Element::new(tag))
    }

    fn text(&mut self, text: &str) -> Node {
        Node::Text(text.to_owned())
    }

    fn line_break(&mut self) -> Node {
        Node::Element(Element::line_break())
    }

    fn set_attribute(&mut self, node: &mut Node, name: &str, value: &str) {
        if let Node::Element(element) = node {
            element.set_attribute(name, value);
        }
    }

    fn append_child(&mut self, parent: &mut Node, child: Node) {
        if let Node::Element(element) = parent {
            element.children.push(child);
        }
    }
}

impl AnnotatedText {
    /// Extracts an annotated text from any [`TreeNode`].
    pub fn from_tree<N: TreeNode>(root: &N, options: &ExtractOptions) -> Result<Self> {
        extract(root, options)
    }

    /// Renders into the reference DOM.
    pub fn to_element(&self) -> Element {
        match render(self, &mut DomSink) {
            Node::Element(element) => element,
            Node::Text(text) => Element::new(self.tag()).text(text),
        }
    }
}

impl std::fmt::Display for AnnotatedText {
    /// Outer HTML of the rendered element.
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.to_element().outer_html())
    }
}
