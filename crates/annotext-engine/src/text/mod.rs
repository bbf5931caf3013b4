//! # Annotated Text
//!
//! [`AnnotatedText`] is a flat string plus a canonical list of markups. It is
//! the single value every other part of the engine produces or consumes:
//! extraction builds one from a tree, rendering turns one back into a tree,
//! and the editing operations keep its markups consistent with its text.
//!
//! ## Invariants
//!
//! After every public operation:
//!
//! 1. `len()` equals the number of chars in `text()`
//! 2. markups are sorted by `(type, start, end)`
//! 3. no two markups of the same type (and href) overlap or touch
//! 4. different types may overlap freely
//! 5. every markup satisfies `0 <= start < end <= len()`
//!
//! [`invariants::check`](crate::invariants::check) asserts all of them.
//!
//! ## Mutation Contract
//!
//! Methods taking `&mut self` (`add_markup`, `remove_markup`, `replace`)
//! edit the receiver and return nothing. Methods taking `&self` (`substr`,
//! `substring`, `append`) return a fresh value that shares nothing with the
//! receiver.
//!
//! ## Modules
//!
//! - **`replace`**: regex-driven substitution with markup offset repair
//! - **`slice`**: `substr`, `substring` and `append`
//! - **`persist`**: the JSON form (`to_json` / `from_json`)

pub mod persist;
pub mod replace;
pub mod slice;

use serde_json::{Map, Value};

use crate::markup::{Markup, MarkupType, compare, merge_adjacent};

/// Tag used by [`AnnotatedText::from_text`].
pub const DEFAULT_TAG: &str = "p";

/// Rich text as a flat string plus typed ranges.
#[derive(Debug, Clone)]
pub struct AnnotatedText {
    /// Tag name of the block element this text came from (e.g. `p`, `h2`).
    tag: String,
    text: String,
    /// Cached char count of `text`.
    length: usize,
    markups: Vec<Markup>,
    /// Unrecognised keys of the persisted form, written back unchanged.
    extra: Map<String, Value>,
}

impl AnnotatedText {
    /// Plain text under the given tag, without markups.
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            tag: tag.into(),
            length: text.chars().count(),
            text,
            markups: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Plain text under the default `p` tag.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(DEFAULT_TAG, text)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Markups in canonical order.
    pub fn markups(&self) -> &[Markup] {
        &self.markups
    }

    /// Keys of the persisted form this engine does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Adds a markup, keeping the list sorted and merged.
    ///
    /// Collapsed or backwards markups are dropped silently. A link first
    /// clears every link it overlaps, whatever their href, since links never
    /// nest. An `end` past the text is clamped to the text length.
    pub fn add_markup(&mut self, mut markup: Markup) {
        markup.end = markup.end.min(self.length);
        if markup.start >= markup.end {
            return;
        }
        if markup.kind != MarkupType::Link {
            markup.href = None;
        } else {
            self.remove_markup(&markup);
        }

        let index = self
            .markups
            .partition_point(|existing| compare(existing, &markup).is_le());
        self.markups.insert(index, markup);
        merge_adjacent(&mut self.markups);
    }

    pub fn add_markups(&mut self, markups: impl IntoIterator<Item = Markup>) {
        for markup in markups {
            self.add_markup(markup);
        }
    }

    /// Removes `range.kind` formatting from `[range.start, range.end)`.
    ///
    /// Markups of that type are truncated or dropped where they intersect the
    /// range; a markup that fully contains it is split in two. Links are
    /// matched by type only, the href of `range` is ignored.
    pub fn remove_markup(&mut self, range: &Markup) {
        if range.is_empty() {
            return;
        }

        let mut i = 0;
        while i < self.markups.len() {
            let markup = &mut self.markups[i];
            if markup.kind > range.kind {
                break;
            }
            if markup.kind != range.kind {
                i += 1;
                continue;
            }

            if markup.start <= range.start && markup.end >= range.end {
                let before = markup.with_range(markup.start, range.start);
                let after = markup.with_range(range.end, markup.end);
                let pieces: Vec<Markup> = [before, after]
                    .into_iter()
                    .filter(|piece| !piece.is_empty())
                    .collect();
                self.markups.splice(i..=i, pieces);
                // At most one markup of a type can contain the range.
                return;
            }

            if markup.start >= range.start && markup.start < range.end {
                markup.start = range.end;
            }
            if markup.end > range.start && markup.end <= range.end {
                markup.end = range.start;
            }

            if markup.is_empty() {
                self.markups.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Same tag, same text, and pairwise identical markups.
    pub fn equals(&self, other: &AnnotatedText) -> bool {
        self.tag == other.tag && self.text == other.text && self.markups == other.markups
    }

    /// Replaces the text and refreshes the cached length. Callers are
    /// responsible for the markups.
    pub(crate) fn set_text(&mut self, text: String) {
        self.length = text.chars().count();
        self.text = text;
    }

    pub(crate) fn markups_mut(&mut self) -> &mut Vec<Markup> {
        &mut self.markups
    }

    pub(crate) fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

impl PartialEq for AnnotatedText {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for AnnotatedText {}
