//! Include path analysis
//!
//! Splits a script or resource path into components and pulls out the file
//! name, extension and anything that looks like a version number.

use crate::error::{ExtractError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Longest path, in components, the analyzer accepts
pub const MAX_PATH_COMPONENTS: usize = 22;

/// Value reported when several components carry a version
pub const MULTIPLE_VERSIONS: &str = "multiple";

fn dotted_version() -> &'static Regex {
    static DOTTED: OnceLock<Regex> = OnceLock::new();
    DOTTED.get_or_init(|| {
        Regex::new(r"[0-9]+(?:\.[0-9]+)+")
            .unwrap_or_else(|e| unreachable!("dotted version pattern is valid: {e}"))
    })
}

fn prefixed_version() -> &'static Regex {
    static PREFIXED: OnceLock<Regex> = OnceLock::new();
    PREFIXED.get_or_init(|| {
        Regex::new(r"^v([0-9]+)")
            .unwrap_or_else(|e| unreachable!("prefixed version pattern is valid: {e}"))
    })
}

/// Version found in a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionNumber {
    /// Exactly one component carried a version
    Single(String),
    /// More than one did
    Multiple,
}

impl VersionNumber {
    /// The version, or `"multiple"`
    pub fn as_str(&self) -> &str {
        match self {
            VersionNumber::Single(version) => version,
            VersionNumber::Multiple => MULTIPLE_VERSIONS,
        }
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Breakdown of a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathAnalysis {
    /// Non-empty `/`-separated segments
    pub components: Vec<String>,
    /// Last component, unless the path ends in `/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Text after the last `.` of the file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// Version number, if any component carries one
    pub version_number: Option<VersionNumber>,
}

/// Analyze a POSIX-style path
///
/// Returns `Ok(None)` for a blank path.
pub fn analyze_path(path: &str) -> Result<Option<PathAnalysis>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let components: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if components.len() > MAX_PATH_COMPONENTS {
        return Err(ExtractError::PathTooLong {
            components: components.len(),
            limit: MAX_PATH_COMPONENTS,
        });
    }

    let file = if path.ends_with('/') {
        None
    } else {
        components.last().cloned()
    };
    let file_extension = file
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_string());

    Ok(Some(PathAnalysis {
        version_number: detect_version(&components),
        components,
        file,
        file_extension,
    }))
}

fn detect_version(components: &[String]) -> Option<VersionNumber> {
    let mut found = components.iter().filter_map(|component| {
        dotted_version()
            .find(component)
            .map(|m| m.as_str())
            .or_else(|| {
                prefixed_version()
                    .captures(component)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str())
            })
    });

    match (found.next(), found.next()) {
        (None, _) => None,
        (Some(version), None) => Some(VersionNumber::Single(version.to_string())),
        (Some(_), Some(_)) => Some(VersionNumber::Multiple),
    }
}
