//! Regex substitution with markup offset repair.
//!
//! Every occurrence is located in the original text. Markup offsets are
//! repaired one occurrence at a time, against the text as it stands after
//! the previous substitutions. `drift` converts original offsets into that
//! current coordinate space.

use regex::{Captures, Regex};

use crate::markup::{Markup, merge_adjacent};
use crate::text::AnnotatedText;

/// One regex match, as seen by a [`Replacement`].
///
/// Offsets and slices refer to the original text, before any substitution
/// of this `replace` call took place.
pub struct Occurrence<'h> {
    pattern: &'h Regex,
    captures: Captures<'h>,
    haystack: &'h str,
    offset: usize,
}

impl<'h> Occurrence<'h> {
    /// The matched text.
    pub fn as_str(&self) -> &'h str {
        self.whole().as_str()
    }

    /// Capture group `index`, `None` when it did not participate.
    pub fn group(&self, index: usize) -> Option<&'h str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Named capture group, `None` when it did not participate.
    pub fn name(&self, name: &str) -> Option<&'h str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.captures.len() - 1
    }

    /// Char offset of the match in the original text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The original text.
    pub fn haystack(&self) -> &'h str {
        self.haystack
    }

    /// Original text before the match.
    pub fn before(&self) -> &'h str {
        &self.haystack[..self.whole().start()]
    }

    /// Original text after the match.
    pub fn after(&self) -> &'h str {
        &self.haystack[self.whole().end()..]
    }

    fn whole(&self) -> regex::Match<'h> {
        self.captures
            .get(0)
            .unwrap_or_else(|| unreachable!("group 0 always participates in a match"))
    }

    fn has_named_groups(&self) -> bool {
        self.pattern.capture_names().flatten().next().is_some()
    }
}

/// Produces the text substituted for one occurrence.
///
/// Returning `None` leaves the occurrence untouched, as does returning the
/// matched text itself.
pub trait Replacement {
    fn replacement_for(&mut self, occurrence: &Occurrence<'_>) -> Option<String>;
}

/// Template strings: `$$`, `$&`, `` $` ``, `$'`, `$N`, `$NN` and `$<name>`.
impl Replacement for &str {
    fn replacement_for(&mut self, occurrence: &Occurrence<'_>) -> Option<String> {
        Some(expand(self, occurrence))
    }
}

impl Replacement for String {
    fn replacement_for(&mut self, occurrence: &Occurrence<'_>) -> Option<String> {
        Some(expand(self, occurrence))
    }
}

impl Replacement for &String {
    fn replacement_for(&mut self, occurrence: &Occurrence<'_>) -> Option<String> {
        Some(expand(self, occurrence))
    }
}

/// Inserts its text verbatim, without `$` expansion.
#[derive(Debug, Clone, Copy)]
pub struct Literal<'a>(pub &'a str);

impl Replacement for Literal<'_> {
    fn replacement_for(&mut self, _occurrence: &Occurrence<'_>) -> Option<String> {
        Some(self.0.to_owned())
    }
}

impl<F, S> Replacement for F
where
    F: FnMut(&Occurrence<'_>) -> Option<S>,
    S: AsRef<str>,
{
    fn replacement_for(&mut self, occurrence: &Occurrence<'_>) -> Option<String> {
        (self)(occurrence).map(|s| s.as_ref().to_owned())
    }
}

/// Expands `$` tokens of a template for one occurrence.
///
/// Group references prefer the two-digit form when that group exists. Group
/// 0 and groups the pattern does not have stay verbatim. `$<name>` stays
/// verbatim only when the pattern has no named groups at all.
fn expand(template: &str, occurrence: &Occurrence<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let groups = occurrence.group_count();
    let mut rest = template;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        rest = &rest[dollar..];
        let bytes = rest.as_bytes();

        let consumed = match bytes.get(1) {
            Some(b'$') => {
                out.push('$');
                2
            }
            Some(b'&') => {
                out.push_str(occurrence.as_str());
                2
            }
            Some(b'`') => {
                out.push_str(occurrence.before());
                2
            }
            Some(b'\'') => {
                out.push_str(occurrence.after());
                2
            }
            Some(b'<') => match rest[2..].find('>') {
                // Unknown names expand to nothing when the pattern has names.
                Some(close) if occurrence.has_named_groups() => {
                    out.push_str(occurrence.name(&rest[2..2 + close]).unwrap_or(""));
                    close + 3
                }
                _ => {
                    out.push('$');
                    1
                }
            },
            Some(d) if d.is_ascii_digit() => {
                let one = usize::from(d - b'0');
                let two = bytes
                    .get(2)
                    .filter(|b| b.is_ascii_digit())
                    .map(|b| one * 10 + usize::from(b - b'0'));

                match two {
                    Some(index) if (1..=groups).contains(&index) => {
                        out.push_str(occurrence.group(index).unwrap_or(""));
                        3
                    }
                    _ if (1..=groups).contains(&one) => {
                        out.push_str(occurrence.group(one).unwrap_or(""));
                        2
                    }
                    _ => {
                        out.push('$');
                        1
                    }
                }
            }
            _ => {
                out.push('$');
                1
            }
        };
        rest = &rest[consumed..];
    }

    out.push_str(rest);
    out
}

/// Moves markup bounds for one substitution of `removed` chars by `inserted`
/// chars at char offset `at` of the current text.
///
/// Bounds strictly inside the replaced run snap to its edges: starts to the
/// end of the inserted text, ends to its beginning. Markups left empty are
/// dropped.
fn repair(markups: &mut Vec<Markup>, at: usize, removed: usize, inserted: usize) {
    let inside = |n: usize| n > at && n < at + removed;

    markups.retain_mut(|markup| {
        if inside(markup.start) {
            markup.start = at + inserted;
        } else if markup.start > at {
            markup.start = markup.start - removed + inserted;
        }

        if inside(markup.end) {
            markup.end = at;
        } else if markup.end > at {
            markup.end = markup.end - removed + inserted;
        }

        markup.start < markup.end
    });
}

impl AnnotatedText {
    /// Replaces every match of `pattern`, repairing markup offsets.
    ///
    /// ```
    /// use annotext_engine::{AnnotatedText, Markup};
    /// use regex::Regex;
    ///
    /// let mut text = AnnotatedText::from_text("a...b...c");
    /// text.add_markup(Markup::italic(4, 5));
    /// text.replace(&Regex::new(r"\.\.\.").unwrap(), "…");
    ///
    /// assert_eq!(text.text(), "a…b…c");
    /// assert_eq!(text.markups(), &[Markup::italic(2, 3)]);
    /// ```
    pub fn replace<R: Replacement>(&mut self, pattern: &Regex, replacement: R) {
        self.replacen(pattern, 0, replacement);
    }

    /// Like [`replace`](Self::replace) but visits at most `limit` matches.
    /// A `limit` of 0 visits all of them.
    pub fn replacen<R: Replacement>(&mut self, pattern: &Regex, limit: usize, mut replacement: R) {
        let haystack = self.text.as_str();
        let mut out = String::with_capacity(haystack.len());
        let mut copied_to = 0;
        let mut changed = false;

        // Char offset of the current match in the original text.
        let mut offset = 0;
        let mut counted_to = 0;
        // Original length minus current length of everything already processed.
        let mut drift: isize = 0;

        let limit = if limit == 0 { usize::MAX } else { limit };
        for captures in pattern.captures_iter(haystack).take(limit) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            offset += haystack[counted_to..whole.start()].chars().count();
            counted_to = whole.start();

            let occurrence = Occurrence {
                pattern,
                captures,
                haystack,
                offset,
            };
            let Some(substitute) = replacement
                .replacement_for(&occurrence)
                .filter(|s| s.as_str() != whole.as_str())
            else {
                log::trace!("replace: kept occurrence at {offset}");
                continue;
            };

            let removed = whole.as_str().chars().count();
            let inserted = substitute.chars().count();
            let at = offset.saturating_add_signed(-drift);
            repair(&mut self.markups, at, removed, inserted);
            drift += removed as isize - inserted as isize;
            log::trace!("replace: {removed} chars at {at} became {inserted}, drift {drift}");

            out.push_str(&haystack[copied_to..whole.start()]);
            out.push_str(&substitute);
            copied_to = whole.end();
            changed = true;
        }

        if !changed {
            return;
        }
        out.push_str(&haystack[copied_to..]);
        merge_adjacent(&mut self.markups);
        self.set_text(out);
    }
}
