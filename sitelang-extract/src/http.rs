//! Transport header decoding
//!
//! Headers arrive as a JSON list of records, e.g.
//! `[{"h": "Content-Language", "v": "de"}]`, or as an object mapping names to
//! values (`{}` being no headers at all). The long field names `name` and
//! `value` are accepted in records, and a value may be a list of strings for
//! repeated headers.

use crate::error::{ExtractError, Result};
use crate::html::exactly_one;
use serde::{Deserialize, Serialize};
use sitelang_core::{parse_lang_tags, AcceptedLanguages, LanguageTag};

/// Header carrying the content language
pub const CONTENT_LANGUAGE: &str = "Content-Language";

/// Value of a header: one string, or several for repeated headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Single value
    Single(String),
    /// Repeated header
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Iterate over the individual values
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        let slice: &[String] = match self {
            HeaderValue::Single(value) => std::slice::from_ref(value),
            HeaderValue::Multiple(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        HeaderValue::Multiple(values)
    }
}

#[derive(Deserialize)]
struct HeaderRecord {
    #[serde(alias = "name")]
    h: String,
    #[serde(alias = "value")]
    v: HeaderValue,
}

/// Headers in arrival order with case-insensitive lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderMap {
    entries: Vec<(String, HeaderValue)>,
}

impl HeaderMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header; earlier entries with the same name are kept
    pub fn insert<N: Into<String>, V: Into<HeaderValue>>(&mut self, name: N, value: V) {
        self.entries.push((name.into(), value.into()));
    }

    /// First header with this name, ignoring case
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Every header with this name, ignoring case, in arrival order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Iterate in arrival order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no headers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The content language, if the header names exactly one accepted tag
    ///
    /// Tags from every Content-Language record and every value of a
    /// repeated header are pooled before the single-match check.
    pub fn content_language(&self, accepted: &AcceptedLanguages) -> Option<LanguageTag> {
        let tags: Vec<LanguageTag> = self
            .get_all(CONTENT_LANGUAGE)
            .flat_map(HeaderValue::values)
            .flat_map(|v| parse_lang_tags(v, accepted))
            .collect();
        exactly_one(tags)
    }
}

impl<N: Into<String>, V: Into<HeaderValue>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Decode a JSON header blob
///
/// Text that is not JSON at all means no headers are available (`Ok(None)`).
/// A list of name/value records and an object of names to values are both
/// header sets; JSON of any other shape is an error.
pub fn parse_header_json(raw: &str) -> Result<Option<HeaderMap>> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "header blob is not JSON");
            return Ok(None);
        }
    };

    let malformed = |e: serde_json::Error| ExtractError::MalformedHeader(e.to_string());
    let map = match value {
        serde_json::Value::Object(fields) => fields
            .into_iter()
            .map(|(name, value)| serde_json::from_value::<HeaderValue>(value).map(|v| (name, v)))
            .collect::<std::result::Result<HeaderMap, serde_json::Error>>()
            .map_err(malformed)?,
        other => serde_json::from_value::<Vec<HeaderRecord>>(other)
            .map_err(malformed)?
            .into_iter()
            .map(|record| (record.h, record.v))
            .collect(),
    };

    Ok(Some(map))
}

/// Headers given either as a raw JSON blob or already decoded
#[derive(Debug, Clone)]
pub enum HeaderInput {
    /// JSON still to be decoded
    Raw(String),
    /// Decoded headers
    Parsed(HeaderMap),
}

impl HeaderInput {
    /// No headers
    pub fn none() -> Self {
        HeaderInput::Parsed(HeaderMap::new())
    }

    /// Decode if needed
    pub fn into_map(self) -> Result<Option<HeaderMap>> {
        match self {
            HeaderInput::Raw(raw) => parse_header_json(&raw),
            HeaderInput::Parsed(map) => Ok(Some(map)),
        }
    }

    /// Content language, decoding raw input on the fly
    pub fn content_language(&self, accepted: &AcceptedLanguages) -> Result<Option<LanguageTag>> {
        match self {
            HeaderInput::Raw(raw) => {
                Ok(parse_header_json(raw)?.and_then(|map| map.content_language(accepted)))
            }
            HeaderInput::Parsed(map) => Ok(map.content_language(accepted)),
        }
    }
}

impl From<HeaderMap> for HeaderInput {
    fn from(map: HeaderMap) -> Self {
        HeaderInput::Parsed(map)
    }
}

impl From<String> for HeaderInput {
    fn from(raw: String) -> Self {
        HeaderInput::Raw(raw)
    }
}

impl From<&str> for HeaderInput {
    fn from(raw: &str) -> Self {
        HeaderInput::Raw(raw.to_string())
    }
}
