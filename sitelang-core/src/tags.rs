//! Accepted language tags
//!
//! Every language code that leaves this crate has been validated against an
//! [`AcceptedLanguages`] set. The set is an immutable value handed to every
//! caller explicitly; [`LanguageTag`] can only be obtained through it.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Codes supported by the statistical classifier and accepted from metadata
/// by default.
pub const KNOWN_LANG_TAGS: &[&str] = &[
    "af", "ar", "bg", "bn", "ca", "cs", "cy", "da", "de", "el", "en", "es", "et", "fa", "fi", "fr",
    "gu", "he", "hi", "hr", "hu", "id", "it", "ja", "kn", "ko", "lt", "lv", "mk", "ml", "mr", "ne",
    "nl", "no", "pa", "pl", "pt", "ro", "ru", "sk", "sl", "so", "sq", "sv", "sw", "ta", "te", "th",
    "tl", "tr", "uk", "ur", "vi", "zh-cn", "zh-tw",
];

/// Characters that separate tokens inside a metadata language value
const TOKEN_SEPARATORS: &[char] = &[',', '.', '*', ';', '/', ':', '=', '|'];

/// A lowercase language code known to be in an accepted set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Closed, immutable set of accepted language codes
///
/// Cloning is cheap; the underlying set is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedLanguages {
    codes: Arc<BTreeSet<String>>,
}

impl AcceptedLanguages {
    /// Build a set from arbitrary codes (trimmed and lowercased)
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|code| code.as_ref().trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();
        Self {
            codes: Arc::new(codes),
        }
    }

    /// The default set, see [`KNOWN_LANG_TAGS`]
    pub fn known() -> Self {
        Self::new(KNOWN_LANG_TAGS.iter().copied())
    }

    /// Validate a code, returning its tag if accepted
    pub fn accept(&self, code: &str) -> Option<LanguageTag> {
        let normalized = code.trim().to_lowercase();
        if self.codes.contains(&normalized) {
            Some(LanguageTag(normalized))
        } else {
            None
        }
    }

    /// Check whether a code is accepted
    pub fn contains(&self, code: &str) -> bool {
        self.accept(code).is_some()
    }

    /// Iterate over the accepted codes in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.iter().map(String::as_str)
    }

    /// Number of accepted codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for AcceptedLanguages {
    fn default() -> Self {
        Self::known()
    }
}

/// Find all accepted language tags in a metadata value
///
/// The value is lowercased and split on whitespace and common list
/// punctuation. A token is first tried whole (`_` read as `-`, so `zh_CN`
/// gives `zh-cn`); failing that, its primary subtag is tried (`en-US` gives
/// `en`). Each token yields at most one tag, duplicates are preserved.
pub fn parse_lang_tags(text: &str, accepted: &AcceptedLanguages) -> Vec<LanguageTag> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .filter_map(|token| match_token(token, accepted))
        .collect()
}

fn match_token(token: &str, accepted: &AcceptedLanguages) -> Option<LanguageTag> {
    let normalized = token.replace('_', "-");
    if let Some(tag) = accepted.accept(&normalized) {
        return Some(tag);
    }

    match normalized.split_once('-') {
        Some((primary, _)) if !primary.is_empty() => accepted.accept(primary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_set() {
        let accepted = AcceptedLanguages::known();
        assert_eq!(accepted.len(), 55);
        assert!(accepted.contains("en"));
        assert!(accepted.contains("zh-tw"));
        assert!(!accepted.contains("xx"));
    }

    #[test]
    fn test_accept_normalizes_case() {
        let accepted = AcceptedLanguages::known();
        let tag = accepted.accept(" DE ").unwrap();
        assert_eq!(tag.as_str(), "de");
        assert_eq!(tag, "de");
    }

    #[test]
    fn test_custom_set_is_closed() {
        let accepted = AcceptedLanguages::new(["en", "de"]);
        assert!(accepted.accept("fr").is_none());
        assert_eq!(accepted.iter().collect::<Vec<_>>(), vec!["de", "en"]);
    }

    #[test]
    fn test_parse_region_subtags() {
        let accepted = AcceptedLanguages::known();
        assert_eq!(parse_lang_tags("de_DE", &accepted), vec!["de"]);
        assert_eq!(parse_lang_tags("en-US", &accepted), vec!["en"]);
        assert_eq!(parse_lang_tags("zh-CN", &accepted), vec!["zh-cn"]);
        assert_eq!(parse_lang_tags("zh_TW", &accepted), vec!["zh-tw"]);
    }

    #[test]
    fn test_parse_lists() {
        let accepted = AcceptedLanguages::known();
        assert_eq!(parse_lang_tags("de, en", &accepted), vec!["de", "en"]);
        assert_eq!(parse_lang_tags("it;q=0.8", &accepted), vec!["it"]);
        assert!(parse_lang_tags("klingon", &accepted).is_empty());
        assert!(parse_lang_tags("", &accepted).is_empty());
    }

    #[test]
    fn test_parse_respects_accepted_set() {
        let accepted = AcceptedLanguages::new(["fr"]);
        assert!(parse_lang_tags("en", &accepted).is_empty());
        assert_eq!(parse_lang_tags("fr-CA", &accepted), vec!["fr"]);
    }
}
