//! Meta-language cascade
//!
//! Looks for an authoritative language declaration in three places, in this
//! order:
//!
//! 1. the `lang` attribute of the `<html>` element (first accepted tag wins)
//! 2. `<meta http-equiv="content-language">` (exactly one accepted tag)
//! 3. the `Content-Language` transport header (exactly one accepted tag)

use crate::error::Result;
use crate::html::{DocumentInput, ParsedDocument};
use crate::http::HeaderInput;
use serde::Serialize;
use sitelang_core::{AcceptedLanguages, LanguageTag};
use std::fmt;

/// Where a declared language was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetaSource {
    /// `<html lang>`
    Markup,
    /// `<meta http-equiv="content-language">`
    HttpEquiv,
    /// `Content-Language` header
    Header,
}

impl MetaSource {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaSource::Markup => "markup",
            MetaSource::HttpEquiv => "http-equiv",
            MetaSource::Header => "header",
        }
    }
}

impl fmt::Display for MetaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared language and its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaLanguage {
    /// Accepted tag
    pub language: LanguageTag,
    /// Where it was declared
    pub source: MetaSource,
}

/// Walks the meta-language cascade against one accepted set
#[derive(Debug, Clone, Default)]
pub struct MetaLanguageResolver {
    accepted: AcceptedLanguages,
}

impl MetaLanguageResolver {
    /// Create a resolver
    pub fn new(accepted: AcceptedLanguages) -> Self {
        Self { accepted }
    }

    /// Accepted language set
    pub fn accepted(&self) -> &AcceptedLanguages {
        &self.accepted
    }

    /// The declared language, if any
    ///
    /// Fails only when the header blob has to be consulted and is
    /// structurally malformed.
    pub fn resolve(
        &self,
        headers: &HeaderInput,
        body: &DocumentInput,
    ) -> Result<Option<LanguageTag>> {
        Ok(self
            .resolve_with_source(headers, body)?
            .map(|found| found.language))
    }

    /// Like [`MetaLanguageResolver::resolve`], also reporting the source
    pub fn resolve_with_source(
        &self,
        headers: &HeaderInput,
        body: &DocumentInput,
    ) -> Result<Option<MetaLanguage>> {
        body.with_parsed(|doc| self.resolve_document(headers, doc))
    }

    /// Run the cascade on an already parsed document
    pub fn resolve_document(
        &self,
        headers: &HeaderInput,
        doc: &ParsedDocument,
    ) -> Result<Option<MetaLanguage>> {
        if let Some(language) = doc.html_lang(&self.accepted) {
            tracing::debug!(%language, "language declared in markup");
            return Ok(Some(MetaLanguage {
                language,
                source: MetaSource::Markup,
            }));
        }

        if let Some(language) = doc.http_equiv_lang(&self.accepted) {
            tracing::debug!(%language, "language declared in http-equiv meta");
            return Ok(Some(MetaLanguage {
                language,
                source: MetaSource::HttpEquiv,
            }));
        }

        if let Some(language) = headers.content_language(&self.accepted)? {
            tracing::debug!(%language, "language declared in header");
            return Ok(Some(MetaLanguage {
                language,
                source: MetaSource::Header,
            }));
        }

        tracing::debug!("no declared language");
        Ok(None)
    }
}
