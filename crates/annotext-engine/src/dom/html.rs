//! HTML serialization of the reference DOM.

use std::fmt;

use crate::dom::{Element, Node};

enum Step<'a> {
    Text(&'a str),
    Open(&'a Element),
    Close(&'a str),
}

impl<'a> From<&'a Node> for Step<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Text(text) => Step::Text(text),
            Node::Element(element) => Step::Open(element),
        }
    }
}

fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
}

/// Serializes whatever is on `stack`, top first. Line breaks print as a
/// void `<br>`.
fn write(mut stack: Vec<Step<'_>>) -> String {
    let mut out = String::new();

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Step::Open(element) => {
                write_open_tag(&mut out, element);
                if element.is_line_break() {
                    continue;
                }
                stack.push(Step::Close(element.tag()));
                stack.extend(element.children().iter().rev().map(Step::from));
            }
        }
    }
    out
}

impl Element {
    /// HTML of the children only.
    pub fn inner_html(&self) -> String {
        write(self.children().iter().rev().map(Step::from).collect())
    }

    /// HTML of the element itself, tags included.
    pub fn outer_html(&self) -> String {
        write(vec![Step::Open(self)])
    }
}

impl Node {
    pub fn outer_html(&self) -> String {
        write(vec![Step::from(self)])
    }
}

impl fmt::Display for Element {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.outer_html())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.outer_html())
    }
}
