//! Page metadata extraction for sitelang
//!
//! Everything sitelang reads from a crawled page apart from the statistics:
//! parsed markup and its visible text, transport headers, the declared
//! language cascade, and the script includes with their paths.

#![warn(missing_docs)]

pub mod error;
pub mod html;
pub mod http;
pub mod meta;
pub mod path;
pub mod scripts;

pub use error::{ExtractError, Result};
pub use html::{filter_text, strip_urls, DocumentInput, ParsedDocument, ScriptElement, DESCRIPTION_META_NAMES};
pub use http::{parse_header_json, HeaderInput, HeaderMap, HeaderValue, CONTENT_LANGUAGE};
pub use meta::{MetaLanguage, MetaLanguageResolver, MetaSource};
pub use path::{analyze_path, PathAnalysis, VersionNumber, MAX_PATH_COMPONENTS};
pub use scripts::{classify_scripts, registrable_domain, ScriptKind, ScriptSource};

pub use sitelang_core::{AcceptedLanguages, LanguageTag};
