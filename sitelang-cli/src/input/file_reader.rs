//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of the header blob stored next to a crawled page
pub const HEADERS_SUFFIX: &str = "headers.json";

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a crawled page, replacing invalid UTF-8
    pub fn read_page(path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("{} is not valid UTF-8, decoding lossily", path.display());
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Header blob for a page: `explicit` if given, else `<page>.headers.json`
    /// when it exists
    pub fn headers_for(page: &Path, explicit: Option<&Path>) -> Result<Option<String>> {
        if let Some(path) = explicit {
            return Self::read_text(path).map(Some);
        }

        let sibling = Self::sibling_headers_path(page);
        if sibling.is_file() {
            log::debug!("Using headers from {}", sibling.display());
            Self::read_text(&sibling).map(Some)
        } else {
            Ok(None)
        }
    }

    /// `page.html` -> `page.headers.json`
    pub fn sibling_headers_path(page: &Path) -> PathBuf {
        page.with_extension(HEADERS_SUFFIX)
    }
}
