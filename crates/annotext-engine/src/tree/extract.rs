//! Tree → annotated text.

use crate::error::{Error, Result};
use crate::markup::Markup;
use crate::text::AnnotatedText;
use crate::tree::rules::{Declared, Directive, ExtractOptions, StyleMode, directives};
use crate::tree::{NodeKind, TreeNode};

/// An element whose children are being walked.
struct Frame<'n, N> {
    node: &'n N,
    next_child: usize,
    directives: Vec<Directive>,
    start: usize,
    /// Position of the element in document order, the root being 0.
    preorder: usize,
}

/// Directives of one element with the range they cover.
struct Recorded {
    directives: Vec<Directive>,
    start: usize,
    end: usize,
    preorder: usize,
}

/// Flattens the element `root` into text and markups.
///
/// Text nodes contribute their text and line breaks a `'\n'`. Elements
/// without children contribute nothing. Every other element applies the
/// markups its tag and inline style declare over the text it encloses.
pub fn extract<N: TreeNode>(root: &N, options: &ExtractOptions) -> Result<AnnotatedText> {
    if root.kind() == NodeKind::Text {
        return Err(Error::InvalidInput(
            "only element nodes can be extracted".into(),
        ));
    }
    let mode = options.style_mode;

    let mut text = String::new();
    let mut length = 0;
    let mut recorded = Vec::new();
    let mut preorder = 0;
    let mut stack = vec![Frame {
        node: root,
        next_child: 0,
        directives: directives(&Declared::of(root), mode),
        start: 0,
        preorder,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        let Some(child) = node.child(frame.next_child) else {
            if let Some(done) = stack.pop() {
                recorded.push(Recorded {
                    directives: done.directives,
                    start: done.start,
                    end: length,
                    preorder: done.preorder,
                });
            }
            continue;
        };
        frame.next_child += 1;

        match child.kind() {
            NodeKind::Text => {
                let content = child.text().unwrap_or_default();
                text.push_str(content);
                length += content.chars().count();
            }
            NodeKind::LineBreak => {
                text.push('\n');
                length += 1;
            }
            NodeKind::Element if child.child(0).is_some() => {
                preorder += 1;
                stack.push(Frame {
                    node: child,
                    next_child: 0,
                    directives: directives(&Declared::of(child), mode),
                    start: length,
                    preorder,
                });
            }
            NodeKind::Element => {}
        }
    }

    let tag = root.tag_name().unwrap_or_default().to_ascii_lowercase();
    let mut annotated = AnnotatedText::new(tag, text);

    if mode == StyleMode::Subtractive {
        recorded.sort_by_key(|entry| entry.preorder);
    }
    for entry in recorded {
        for directive in entry.directives {
            match directive {
                Directive::Apply { kind, href } => annotated.add_markup(Markup {
                    kind,
                    start: entry.start,
                    end: entry.end,
                    href,
                }),
                Directive::Clear(kind) => {
                    annotated.remove_markup(&Markup::new(kind, entry.start, entry.end));
                }
            }
        }
    }

    log::debug!(
        "extracted <{}>: {} chars, {} markups",
        annotated.tag(),
        annotated.len(),
        annotated.markups().len()
    );
    Ok(annotated)
}
