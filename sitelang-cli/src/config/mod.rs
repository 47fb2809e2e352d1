//! Configuration file support
//!
//! An optional TOML file supplies defaults; command-line flags override it.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Detection configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&raw)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load a file if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Detection-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Accepted language codes (empty = built-in list)
    pub languages: Vec<String>,

    /// Preset: "fast", "balanced" or "thorough"
    pub preset: String,

    /// Words per window
    pub window_words: Option<usize>,

    /// Windows sampled from long documents
    pub sample_count: Option<usize>,

    /// Probability a window's top language must exceed
    pub threshold: Option<f64>,

    /// Classifier trials per window
    pub trials: Option<usize>,

    /// Fixed classifier seed
    pub seed: Option<u64>,

    /// Use a fresh seed for every document
    pub randomized: bool,

    /// Report window counts instead of shares
    pub counts: bool,

    /// Report the unknown bucket
    pub include_unknown: bool,

    /// Build the classifier in low accuracy mode
    pub low_accuracy: bool,

    /// Remove links and e-mail addresses before detection
    pub strip_urls: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            preset: "balanced".to_string(),
            window_words: None,
            sample_count: None,
            threshold: None,
            trials: None,
            seed: None,
            randomized: false,
            counts: false,
            include_unknown: true,
            low_accuracy: false,
            strip_urls: true,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include per-window records
    pub include_windows: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_windows: false,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Window execution mode: "adaptive", "sequential" or "parallel"
    pub execution_mode: String,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            execution_mode: "adaptive".to_string(),
            worker_threads: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[detection]
languages = ["de", "en"]
seed = 7

[output]
default_format = "json"
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.detection.languages, vec!["de", "en"]);
        assert_eq!(config.detection.seed, Some(7));
        assert_eq!(config.detection.preset, "balanced");
        assert!(config.detection.include_unknown);
        assert!(config.detection.strip_urls);
        assert_eq!(config.output.default_format, "json");
        assert!(config.output.pretty_json);
        assert_eq!(config.performance.worker_threads, 0);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[detection]\nlanguages = 5\n").unwrap();

        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/sitelang.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[detection]"));
        assert!(rendered.contains("[output]"));
        let parsed: CliConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
