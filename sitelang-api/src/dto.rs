//! Data Transfer Objects for API

use sitelang_engine::{Detection, Distribution, SamplingTier, Window};
use sitelang_extract::{MetaLanguage, PathAnalysis, ScriptSource};
use std::collections::BTreeMap;

/// Execution mode for window classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExecutionMode {
    /// Classify windows on the calling thread
    Sequential,
    /// Classify windows across a thread pool
    Parallel,
    /// Decide from the number of windows
    #[default]
    Adaptive,
}

impl From<ExecutionMode> for sitelang_engine::ExecutionMode {
    fn from(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Sequential => sitelang_engine::ExecutionMode::Sequential,
            ExecutionMode::Parallel => sitelang_engine::ExecutionMode::Parallel,
            ExecutionMode::Adaptive => sitelang_engine::ExecutionMode::Adaptive,
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            "adaptive" => Ok(ExecutionMode::Adaptive),
            other => Err(format!("unknown execution mode '{other}'")),
        }
    }
}

/// Where a page verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VerdictSource {
    /// `<html lang>`
    Markup,
    /// `<meta http-equiv="content-language">`
    HttpEquiv,
    /// `Content-Language` header
    Header,
    /// Statistical detection over the body text
    Statistical,
}

impl VerdictSource {
    /// Kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictSource::Markup => "markup",
            VerdictSource::HttpEquiv => "http-equiv",
            VerdictSource::Header => "header",
            VerdictSource::Statistical => "statistical",
        }
    }

    /// Whether the page declared its language
    pub fn is_declared(&self) -> bool {
        !matches!(self, VerdictSource::Statistical)
    }
}

impl From<sitelang_extract::MetaSource> for VerdictSource {
    fn from(source: sitelang_extract::MetaSource) -> Self {
        match source {
            sitelang_extract::MetaSource::Markup => VerdictSource::Markup,
            sitelang_extract::MetaSource::HttpEquiv => VerdictSource::HttpEquiv,
            sitelang_extract::MetaSource::Header => VerdictSource::Header,
        }
    }
}

/// Per-window record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowDTO {
    /// Word offset of the first word
    pub start_offset: usize,
    /// Window text
    pub text: String,
    /// Language code or `"unk"`
    pub label: String,
    /// Classifier probabilities, absent when it had no answer
    pub probabilities: Option<BTreeMap<String, f64>>,
}

impl From<Window> for WindowDTO {
    fn from(window: Window) -> Self {
        Self {
            start_offset: window.start_offset,
            label: window.label.as_str().to_string(),
            probabilities: window.probabilities.map(|probs| {
                probs
                    .iter()
                    .map(|(tag, p)| (tag.as_str().to_string(), p))
                    .collect()
            }),
            text: window.text,
        }
    }
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Words in the text
    pub word_count: usize,
    /// Windows classified
    pub window_count: usize,
    /// Sampling regime (`empty`, `single`, `sliding` or `strided`)
    pub tier: String,
    /// Seed the classifier ran with
    pub seed: u64,
    /// Execution mode used
    pub mode_used: String,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

fn tier_name(tier: SamplingTier) -> &'static str {
    match tier {
        SamplingTier::Empty => "empty",
        SamplingTier::Single => "single",
        SamplingTier::Sliding => "sliding",
        SamplingTier::Strided { .. } => "strided",
    }
}

/// Statistical detection result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextReport {
    /// Shares or counts per label
    pub distribution: BTreeMap<String, f64>,
    /// Label with the largest value, unknown excluded
    pub dominant: Option<String>,
    /// Per-window records, when requested
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub windows: Option<Vec<WindowDTO>>,
    /// Processing metadata
    pub metadata: Metadata,
}

pub(crate) fn distribution_map(distribution: &Distribution) -> BTreeMap<String, f64> {
    distribution
        .iter()
        .map(|(label, value)| (label.as_str().to_string(), value))
        .collect()
}

impl From<Detection> for TextReport {
    fn from(detection: Detection) -> Self {
        let meta = detection.metadata;
        Self {
            distribution: distribution_map(&detection.distribution),
            dominant: detection
                .distribution
                .dominant_language()
                .map(|(tag, _)| tag.as_str().to_string()),
            windows: detection
                .windows
                .map(|windows| windows.into_iter().map(WindowDTO::from).collect()),
            metadata: Metadata {
                word_count: meta.word_count,
                window_count: meta.window_count,
                tier: tier_name(meta.tier).to_string(),
                seed: meta.seed,
                mode_used: meta.execution_mode.as_str().to_string(),
                processing_time_ms: meta.processing_time_ms,
            },
        }
    }
}

/// Verdict for a crawled page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageReport {
    /// Page language, if one was declared or detected
    pub language: Option<String>,
    /// How the language was obtained
    pub source: VerdictSource,
    /// Statistical result, present when the cascade found nothing
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub detection: Option<TextReport>,
}

impl PageReport {
    /// Report for a declared language
    pub fn declared(meta: MetaLanguage) -> Self {
        Self {
            language: Some(meta.language.as_str().to_string()),
            source: meta.source.into(),
            detection: None,
        }
    }

    /// Report for a statistical verdict
    pub fn detected(report: TextReport) -> Self {
        Self {
            language: report.dominant.clone(),
            source: VerdictSource::Statistical,
            detection: Some(report),
        }
    }
}

/// Script element with the analysis of its include path
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScriptReport {
    /// Classified source
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub source: ScriptSource,
    /// Breakdown of `src_path`, includes only
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub path: Option<PathAnalysis>,
}
