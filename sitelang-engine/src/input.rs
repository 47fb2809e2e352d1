//! Text input sources
//!
//! Text to detect can arrive as a string, a file, raw bytes or a stream.
//! [`Input::into_text`] resolves any of them to a UTF-8 string.

use crate::error::{EngineError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Source of document text
pub enum Input {
    /// Text already in memory
    Text(String),
    /// File to read
    File(PathBuf),
    /// Bytes expected to be UTF-8
    Bytes(Vec<u8>),
    /// Stream such as stdin
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl Input {
    /// Input from a string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Input::Text(_) => "<text>".to_string(),
            Input::File(path) => path.display().to_string(),
            Input::Bytes(_) => "<bytes>".to_string(),
            Input::Reader(_) => "<stream>".to_string(),
        }
    }

    /// Read the whole input as UTF-8 text
    pub fn into_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path)
                .map_err(|e| EngineError::IoError(format!("failed to read {}: {e}", path.display()))),
            Input::Bytes(bytes) => Ok(String::from_utf8(bytes)?),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer)?;
                Ok(String::from_utf8(buffer)?)
            }
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}
