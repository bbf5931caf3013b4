//! Slicing and concatenation. Every operation here returns a new value and
//! leaves the receiver untouched.

use crate::markup::Markup;
use crate::text::AnnotatedText;

/// Right-hand side of [`AnnotatedText::append`].
#[derive(Debug, Clone, Copy)]
pub enum Appendix<'a> {
    /// Nothing to append; the result is a copy of the receiver.
    Nothing,
    /// Plain text; markups ending at the end of the receiver grow over it.
    Text(&'a str),
    /// Another annotated text, whose markups are shifted into place.
    Annotated(&'a AnnotatedText),
}

impl<'a> From<&'a str> for Appendix<'a> {
    fn from(text: &'a str) -> Self {
        if text.is_empty() {
            Appendix::Nothing
        } else {
            Appendix::Text(text)
        }
    }
}

impl<'a> From<&'a String> for Appendix<'a> {
    fn from(text: &'a String) -> Self {
        Appendix::from(text.as_str())
    }
}

impl<'a> From<&'a AnnotatedText> for Appendix<'a> {
    fn from(text: &'a AnnotatedText) -> Self {
        Appendix::Annotated(text)
    }
}

impl<'a, T: Into<Appendix<'a>>> From<Option<T>> for Appendix<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Appendix::Nothing, Into::into)
    }
}

/// Byte offset of the char at `index`, or the text length past the end.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

impl AnnotatedText {
    /// `length` chars starting at char `start`, with markups clipped to the
    /// window.
    ///
    /// A negative `start` counts from the end. A missing or overlong `length`
    /// runs to the end of the text; a non-positive one yields an empty text.
    pub fn substr(&self, start: isize, length: Option<isize>) -> AnnotatedText {
        let mut result = AnnotatedText::new(self.tag.clone(), String::new());
        let total = self.length as isize;
        if total == 0 || length.is_some_and(|length| length <= 0) {
            return result;
        }

        let start = if start < 0 {
            start.rem_euclid(total)
        } else {
            start
        };
        if start >= total {
            return result;
        }
        let length = match length {
            Some(length) if length <= total - start => length,
            _ => total - start,
        };
        let end = start + length;

        let from = byte_offset(&self.text, start as usize);
        let to = from + byte_offset(&self.text[from..], length as usize);
        result.set_text(self.text[from..to].to_owned());

        for markup in &self.markups {
            let clipped_start = (markup.start as isize - start).max(0);
            let clipped_end = markup.end.min(end as usize) as isize - start;
            if clipped_end <= clipped_start {
                continue;
            }
            result.add_markup(markup.with_range(clipped_start as usize, clipped_end as usize));
        }
        result
    }

    /// Chars between `start` and `end`, in either order.
    ///
    /// Negative bounds count as 0 and a missing `end` means the end of the
    /// text.
    pub fn substring(&self, start: isize, end: Option<isize>) -> AnnotatedText {
        let (start, end) = match end {
            Some(end) if end < start => (end, Some(start)),
            _ => (start, end),
        };
        let start = start.max(0);
        let end = end.map_or(self.length as isize, |end| end.max(0));
        self.substr(start, Some(end - start))
    }

    /// Concatenates `other` onto a copy of this text.
    ///
    /// ```
    /// use annotext_engine::{AnnotatedText, Markup};
    ///
    /// let mut text = AnnotatedText::from_text("123");
    /// text.add_markup(Markup::bold(2, 3));
    ///
    /// let longer = text.append("45");
    /// assert_eq!(longer.text(), "12345");
    /// assert_eq!(longer.markups(), &[Markup::bold(2, 5)]);
    /// ```
    pub fn append<'a>(&self, other: impl Into<Appendix<'a>>) -> AnnotatedText {
        match other.into() {
            Appendix::Nothing => self.substr(0, None),
            Appendix::Text(text) => {
                let mut result = self.substr(0, None);
                let old_len = result.length;
                let grown = text.chars().count();
                for markup in result.markups_mut() {
                    if markup.end == old_len {
                        markup.end += grown;
                    }
                }
                let joined = format!("{}{text}", result.text);
                result.set_text(joined);
                result
            }
            Appendix::Annotated(other) => {
                let mut result =
                    AnnotatedText::new(self.tag.clone(), format!("{}{}", self.text, other.text));
                result.add_markups(self.markups.iter().cloned());
                result.add_markups(other.markups.iter().map(|markup| {
                    markup.with_range(markup.start + self.length, markup.end + self.length)
                }));
                result
            }
        }
    }
}
