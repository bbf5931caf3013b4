//! # Markups
//!
//! A markup is a typed, half-open character range `[start, end)` over the flat
//! text of an [`AnnotatedText`](crate::AnnotatedText), optionally carrying a
//! link target.
//!
//! ## Type Order
//!
//! [`MarkupType`] has a fixed total order, `Link < Code < Bold < Italic`, which
//! is both the sort key for markup lists and the nesting order used when
//! rendering back to a tree: lower types become outer elements.
//!
//! ## Modules
//!
//! - **`order`**: canonical comparator, merge predicate and the merge sweep
//!   shared by every mutating operation

pub mod order;

use std::fmt;

use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::Error;

pub use order::{can_merge, compare, merge_adjacent};

/// The closed set of markup kinds.
///
/// The discriminants are the integer codes of the persisted JSON form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum MarkupType {
    Link = 0,
    Code = 1,
    Bold = 2,
    Italic = 3,
}

impl MarkupType {
    /// All kinds in canonical order.
    pub const ALL: [MarkupType; 4] = [
        MarkupType::Link,
        MarkupType::Code,
        MarkupType::Bold,
        MarkupType::Italic,
    ];

    /// Persisted integer code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Element tag used when rendering this kind.
    pub fn tag_name(self) -> &'static str {
        match self {
            MarkupType::Link => "a",
            MarkupType::Code => "code",
            MarkupType::Bold => "strong",
            MarkupType::Italic => "em",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            MarkupType::Link => "link",
            MarkupType::Code => "code",
            MarkupType::Bold => "bold",
            MarkupType::Italic => "italic",
        }
    }
}

impl TryFrom<i64> for MarkupType {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MarkupType::Link),
            1 => Ok(MarkupType::Code),
            2 => Ok(MarkupType::Bold),
            3 => Ok(MarkupType::Italic),
            other => Err(Error::UnknownMarkupType(other)),
        }
    }
}

impl fmt::Display for MarkupType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A typed character range over the flat text.
///
/// `href` is only ever set for [`MarkupType::Link`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Markup {
    #[serde(rename = "type")]
    pub kind: MarkupType,
    /// Inclusive start offset, in chars.
    pub start: usize,
    /// Exclusive end offset, in chars.
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Markup {
    /// A non-link markup. Use [`Markup::link`] for links.
    pub fn new(kind: MarkupType, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            href: None,
        }
    }

    pub fn link(href: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind: MarkupType::Link,
            start,
            end,
            href: Some(href.into()),
        }
    }

    pub fn code(start: usize, end: usize) -> Self {
        Self::new(MarkupType::Code, start, end)
    }

    pub fn bold(start: usize, end: usize) -> Self {
        Self::new(MarkupType::Bold, start, end)
    }

    pub fn italic(start: usize, end: usize) -> Self {
        Self::new(MarkupType::Italic, start, end)
    }

    /// Length in chars; 0 when collapsed or backwards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the markup covers nothing (start >= end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same kind and href over a different range.
    pub(crate) fn with_range(&self, start: usize, end: usize) -> Self {
        Self {
            kind: self.kind,
            start,
            end,
            href: self.href.clone(),
        }
    }
}
