//! Annotated text → tree.
//!
//! Rendering first builds an intermediate arena tree: a root holding one
//! text leaf, into which every markup is woven by splitting the leaves it
//! covers and wrapping the covered pieces. Markups are applied in canonical
//! order, so lower types always end up as outer wrappers. Newlines become
//! line breaks and the finished arena is emitted through a [`TreeSink`].

use crate::markup::{Markup, MarkupType};
use crate::text::AnnotatedText;
use crate::tree::TreeSink;

const ROOT: usize = 0;

#[derive(Debug)]
enum Piece {
    Root,
    Text(String),
    Wrap(Markup),
    LineBreak,
}

#[derive(Debug)]
struct ArenaNode {
    piece: Piece,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<ArenaNode>,
}

impl Arena {
    fn new(text: &str) -> Self {
        let mut arena = Self {
            nodes: vec![ArenaNode {
                piece: Piece::Root,
                children: Vec::new(),
            }],
        };
        let leaf = arena.push(Piece::Text(text.to_owned()));
        arena.nodes[ROOT].children.push(leaf);
        arena
    }

    fn push(&mut self, piece: Piece) -> usize {
        self.nodes.push(ArenaNode {
            piece,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Splits the text child at `position` of `parent` after `at` chars.
    /// The tail becomes a new sibling right after it.
    fn split(&mut self, parent: usize, position: usize, at: usize) {
        let child = self.nodes[parent].children[position];
        let Piece::Text(content) = &mut self.nodes[child].piece else {
            return;
        };
        let byte = content
            .char_indices()
            .nth(at)
            .map_or(content.len(), |(offset, _)| offset);
        let tail = content.split_off(byte);

        let tail = self.push(Piece::Text(tail));
        self.nodes[parent].children.insert(position + 1, tail);
    }

    /// Wraps every text run inside `[markup.start, markup.end)`.
    fn apply(&mut self, markup: &Markup) {
        let mut index = 0;
        let mut stack = vec![(ROOT, 0)];

        while let Some((parent, position)) = stack.pop() {
            let Some(&child) = self.nodes[parent].children.get(position) else {
                continue;
            };
            let mut length = match &self.nodes[child].piece {
                Piece::Text(content) => content.chars().count(),
                Piece::Wrap(_) => {
                    stack.push((parent, position + 1));
                    stack.push((child, 0));
                    continue;
                }
                Piece::Root | Piece::LineBreak => {
                    stack.push((parent, position + 1));
                    continue;
                }
            };

            if index + length <= markup.start {
                index += length;
                stack.push((parent, position + 1));
                continue;
            }

            let mut position = position;
            if index < markup.start {
                let head = markup.start - index;
                self.split(parent, position, head);
                position += 1;
                length -= head;
                index = markup.start;
            }
            if index + length > markup.end {
                length = markup.end - index;
                self.split(parent, position, length);
            }

            let leaf = self.nodes[parent].children[position];
            let wrapper = self.push(Piece::Wrap(markup.clone()));
            self.nodes[wrapper].children.push(leaf);
            self.nodes[parent].children[position] = wrapper;

            index += length;
            if index >= markup.end {
                return;
            }
            stack.push((parent, position + 1));
        }
    }

    /// Turns newlines into line breaks, drops empty text and merges
    /// adjacent text.
    fn normalize(&mut self) {
        for id in 0..self.nodes.len() {
            let children = std::mem::take(&mut self.nodes[id].children);
            let mut normalized = Vec::with_capacity(children.len());

            for child in children {
                let lines = match &self.nodes[child].piece {
                    Piece::Text(content) => content
                        .split('\n')
                        .map(str::to_owned)
                        .collect::<Vec<_>>(),
                    _ => {
                        normalized.push(child);
                        continue;
                    }
                };

                for (i, line) in lines.into_iter().enumerate() {
                    if i > 0 {
                        let line_break = self.push(Piece::LineBreak);
                        normalized.push(line_break);
                    }
                    if line.is_empty() {
                        continue;
                    }
                    let previous = normalized.last().copied();
                    if let Some(Piece::Text(before)) =
                        previous.map(|previous| &mut self.nodes[previous].piece)
                    {
                        before.push_str(&line);
                    } else {
                        let leaf = self.push(Piece::Text(line));
                        normalized.push(leaf);
                    }
                }
            }

            self.nodes[id].children = normalized;
        }
    }
}

/// An arena node whose children are being emitted.
struct Emit<N> {
    id: usize,
    next: usize,
    built: Vec<N>,
}

impl<N> Emit<N> {
    fn new(id: usize) -> Self {
        Self {
            id,
            next: 0,
            built: Vec::new(),
        }
    }
}

fn open_element<S: TreeSink>(sink: &mut S, piece: &Piece, root_tag: &str) -> S::Node {
    match piece {
        Piece::Wrap(markup) => {
            let mut element = sink.element(markup.kind.tag_name());
            if let (MarkupType::Link, Some(href)) = (markup.kind, &markup.href) {
                sink.set_attribute(&mut element, "href", href);
            }
            element
        }
        Piece::Root | Piece::Text(_) | Piece::LineBreak => sink.element(root_tag),
    }
}

/// Builds the element tree for `text` through `sink` and returns its root,
/// an element named after the text's tag.
pub fn render<S: TreeSink>(text: &AnnotatedText, sink: &mut S) -> S::Node {
    let mut arena = Arena::new(text.text());
    for markup in text.markups() {
        arena.apply(markup);
    }
    arena.normalize();

    let mut root = Emit::new(ROOT);
    let mut open: Vec<Emit<S::Node>> = Vec::new();
    loop {
        let frame = open.last_mut().unwrap_or(&mut root);
        let Some(&child) = arena.nodes[frame.id].children.get(frame.next) else {
            let Some(done) = open.pop() else {
                break;
            };
            let mut element = open_element(sink, &arena.nodes[done.id].piece, text.tag());
            for built in done.built {
                sink.append_child(&mut element, built);
            }
            open.last_mut().unwrap_or(&mut root).built.push(element);
            continue;
        };
        frame.next += 1;

        match &arena.nodes[child].piece {
            Piece::Text(content) => {
                let node = sink.text(content);
                frame.built.push(node);
            }
            Piece::LineBreak => {
                let node = sink.line_break();
                frame.built.push(node);
            }
            Piece::Wrap(_) | Piece::Root => open.push(Emit::new(child)),
        }
    }

    let mut element = sink.element(text.tag());
    for built in root.built {
        sink.append_child(&mut element, built);
    }
    element
}
