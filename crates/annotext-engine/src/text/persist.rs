//! The persisted JSON form.
//!
//! ```json
//! { "type": "p", "text": "One two", "length": 7,
//!   "markups": [ { "type": 2, "start": 0, "end": 3 } ] }
//! ```
//!
//! `type` and `text` are required. `length` is derived on write and ignored
//! on read. Keys this module does not know are kept and written back as-is.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::markup::{Markup, MarkupType};
use crate::text::AnnotatedText;

/// A markup as written in JSON, before its type code is checked.
#[derive(Debug, Deserialize)]
struct RawMarkup {
    #[serde(rename = "type")]
    kind: i64,
    start: usize,
    end: usize,
    #[serde(default)]
    href: Option<String>,
}

impl RawMarkup {
    fn into_markup(self) -> Result<Markup> {
        let kind = MarkupType::try_from(self.kind)?;
        Ok(match (kind, self.href) {
            (MarkupType::Link, Some(href)) => Markup::link(href, self.start, self.end),
            _ => Markup::new(kind, self.start, self.end),
        })
    }
}

impl AnnotatedText {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses the persisted form. See [`from_value`](Self::from_value).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Builds a text from an already parsed JSON value.
    ///
    /// Markups are validated against the text and then canonicalised, so
    /// unsorted or touching markups in the input are accepted.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(Error::InvalidInput("expected a JSON object".into()));
        };

        let Some(Value::String(text)) = object.remove("text") else {
            return Err(Error::InvalidInput("\"text\" must be a string".into()));
        };
        let tag = match object.remove("type") {
            Some(Value::String(tag)) if !tag.is_empty() => tag,
            _ => {
                return Err(Error::InvalidInput(
                    "\"type\" must be a non-empty string".into(),
                ));
            }
        };
        object.remove("length");

        let raw_markups = match object.remove("markups") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::InvalidInput("\"markups\" must be an array".into()));
            }
        };

        let mut annotated = AnnotatedText::new(tag, text);
        for raw in raw_markups {
            let markup = serde_json::from_value::<RawMarkup>(raw)?.into_markup()?;
            if markup.end > annotated.len() {
                return Err(Error::InvalidInput(format!(
                    "{} markup ends at {} but the text is {} chars long",
                    markup.kind,
                    markup.end,
                    annotated.len()
                )));
            }
            annotated.add_markup(markup);
        }
        *annotated.extra_mut() = object;
        Ok(annotated)
    }
}

impl Serialize for AnnotatedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.extra.len()))?;
        map.serialize_entry("type", &self.tag)?;
        map.serialize_entry("text", &self.text)?;
        map.serialize_entry("length", &self.length)?;
        map.serialize_entry("markups", &self.markups)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnnotatedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AnnotatedText::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for AnnotatedText {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self> {
        Self::from_json(json)
    }
}
