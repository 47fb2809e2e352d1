//! Output formatting module

use anyhow::Result;
use serde::Serialize;
use sitelang_api::{MetaLanguage, PageReport, ScriptReport, TextReport};

/// Result for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Input path as given
    pub path: String,
    /// Command-specific result
    #[serde(flatten)]
    pub result: ReportKind,
}

/// Command-specific part of a [`FileReport`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportKind {
    /// Statistical detection over plain text
    Detect {
        /// Detection result
        report: TextReport,
    },
    /// Declared language only
    Meta {
        /// Declared language and where it came from
        declared: Option<MetaLanguage>,
    },
    /// Full page analysis
    Analyze {
        /// Page verdict
        report: PageReport,
        /// Script sources, when a domain was given
        #[serde(skip_serializing_if = "Option::is_none")]
        scripts: Option<Vec<ScriptReport>>,
    },
}

impl ReportKind {
    /// Language reported for the file, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            ReportKind::Detect { report } => report.dominant.as_deref(),
            ReportKind::Meta { declared } => declared.as_ref().map(|d| d.language.as_str()),
            ReportKind::Analyze { report, .. } => report.language.as_deref(),
        }
    }

    /// How the language was obtained
    pub fn source(&self) -> &'static str {
        match self {
            ReportKind::Detect { .. } => "statistical",
            ReportKind::Meta { declared } => declared.as_ref().map_or("none", |d| d.source.as_str()),
            ReportKind::Analyze { report, .. } => report.source.as_str(),
        }
    }

    /// Label values to show, largest first
    pub fn distribution(&self) -> Vec<(&str, f64)> {
        let map = match self {
            ReportKind::Detect { report } => Some(&report.distribution),
            ReportKind::Analyze { report, .. } => report.detection.as_ref().map(|d| &d.distribution),
            ReportKind::Meta { .. } => None,
        };
        let mut entries: Vec<(&str, f64)> = map
            .into_iter()
            .flatten()
            .map(|(label, value)| (label.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the result for one file
    fn format_report(&mut self, report: &FileReport) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Render a value for display: shares with two decimals, counts as integers
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
