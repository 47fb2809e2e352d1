//! Public API for sitelang site language detection
//!
//! This crate ties the meta-language cascade and the statistical detector
//! together behind one stable interface. A page's declared language wins;
//! only pages that declare nothing usable fall back to windowed detection
//! over their visible body text.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use dto::distribution_map;
use error::Result;
use sitelang_engine::WindowedDetector;
use sitelang_extract::{analyze_path, classify_scripts, strip_urls};
use std::collections::BTreeMap;
use std::sync::Arc;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{
    ExecutionMode, Metadata, PageReport, ScriptReport, TextReport, VerdictSource, WindowDTO,
};
pub use error::ApiError;
pub use sitelang_engine::{
    AcceptedLanguages, AggregationMode, Input, LanguageClassifier, SeedPolicy, TrialConfig,
    KNOWN_LANG_TAGS, UNKNOWN_LABEL,
};
pub use sitelang_extract::{
    DocumentInput, HeaderInput, HeaderMap, MetaLanguage, MetaLanguageResolver, MetaSource,
    ParsedDocument, PathAnalysis, ScriptKind, ScriptSource,
};

/// Main entry point for page language analysis
///
/// Holds one classifier for its whole lifetime; build it once and reuse it
/// for every page.
pub struct PageAnalyzer {
    detector: Arc<WindowedDetector>,
    resolver: MetaLanguageResolver,
    config: Config,
}

impl std::fmt::Debug for PageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAnalyzer")
            .field("detector", &self.detector)
            .field("config", &self.config)
            .finish()
    }
}

impl PageAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create an analyzer restricted to the given languages
    pub fn with_languages<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Config::builder().languages(codes)?.build_analyzer()
    }

    /// Create an analyzer with custom configuration and the default classifier
    pub fn with_config(config: Config) -> Result<Self> {
        let detector = WindowedDetector::builder()
            .config(config.detector().clone())
            .accepted_languages(config.accepted().clone())
            .low_accuracy(config.low_accuracy())
            .build()?;
        Ok(Self::assemble(detector, config))
    }

    /// Create an analyzer around a custom classifier
    pub fn with_classifier(
        config: Config,
        classifier: Arc<dyn LanguageClassifier>,
    ) -> Result<Self> {
        let detector = WindowedDetector::builder()
            .config(config.detector().clone())
            .accepted_languages(config.accepted().clone())
            .shared_classifier(classifier)
            .build()?;
        Ok(Self::assemble(detector, config))
    }

    fn assemble(detector: WindowedDetector, config: Config) -> Self {
        Self {
            detector: Arc::new(detector),
            resolver: MetaLanguageResolver::new(config.accepted().clone()),
            config,
        }
    }

    /// Language of a crawled page
    ///
    /// Runs the meta-language cascade first and falls back to statistical
    /// detection over the body text when no single language is declared.
    pub fn analyze(&self, headers: &HeaderInput, body: &DocumentInput) -> Result<PageReport> {
        body.with_parsed(|doc| self.analyze_document(headers, doc))
    }

    /// [`PageAnalyzer::analyze`] on an already parsed document
    pub fn analyze_document(
        &self,
        headers: &HeaderInput,
        doc: &ParsedDocument,
    ) -> Result<PageReport> {
        if let Some(declared) = self.resolver.resolve_document(headers, doc)? {
            return Ok(PageReport::declared(declared));
        }

        let text = doc
            .body_text_with(self.config.strip_urls())
            .unwrap_or_default();
        tracing::debug!(chars = text.len(), "no declared language, detecting from body text");
        Ok(PageReport::detected(self.detect_text(&text)?))
    }

    /// Declared language only, without the statistical fallback
    pub fn declared_language(
        &self,
        headers: &HeaderInput,
        body: &DocumentInput,
    ) -> Result<Option<MetaLanguage>> {
        Ok(self.resolver.resolve_with_source(headers, body)?)
    }

    /// Statistical detection over plain text
    ///
    /// Links are removed first unless the configuration keeps them.
    pub fn detect_text(&self, text: &str) -> Result<TextReport> {
        let detection = if self.config.strip_urls() {
            self.detector.detect(&strip_urls(text))?
        } else {
            self.detector.detect(text)?
        };
        Ok(detection.into())
    }

    /// Statistical detection over any input source
    pub fn detect_input(&self, input: Input) -> Result<TextReport> {
        let text = input.into_text()?;
        self.detect_text(&text)
    }

    /// Language shares of the page description metas
    pub fn detect_description(&self, body: &DocumentInput) -> Result<BTreeMap<String, f64>> {
        let description = body.with_parsed(ParsedDocument::description);
        let detection = self.detector.detect(&description)?;
        Ok(distribution_map(&detection.distribution))
    }

    /// Script sources of a page served under `domain`, with include paths
    /// broken down
    pub fn scripts(&self, domain: &str, body: &DocumentInput) -> Vec<ScriptReport> {
        let scripts = body.with_parsed(ParsedDocument::scripts);
        classify_scripts(domain, &scripts)
            .into_iter()
            .map(|source| {
                let path = source
                    .src_path
                    .as_deref()
                    .and_then(|path| match analyze_path(path) {
                        Ok(analysis) => analysis,
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping include path analysis");
                            None
                        }
                    });
                ScriptReport { source, path }
            })
            .collect()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accepted language set
    pub fn accepted_languages(&self) -> &AcceptedLanguages {
        self.config.accepted()
    }
}

// Convenience functions

/// Analyze a page with the default configuration
///
/// `headers` is the JSON header blob as stored by the crawler.
pub fn analyze_page(headers: &str, body: &str) -> Result<PageReport> {
    let analyzer = PageAnalyzer::new()?;
    analyzer.analyze(&HeaderInput::from(headers), &DocumentInput::from(body))
}

/// Detect the language distribution of plain text with the default
/// configuration
pub fn detect_text(text: &str) -> Result<TextReport> {
    let analyzer = PageAnalyzer::new()?;
    analyzer.detect_text(text)
}

/// Detect the language distribution of a file
pub fn detect_file<P: AsRef<std::path::Path>>(path: P) -> Result<TextReport> {
    let analyzer = PageAnalyzer::new()?;
    analyzer.detect_input(Input::from_file(path.as_ref().to_path_buf()))
}
