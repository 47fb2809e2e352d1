//! Meta command implementation

use super::{init_logging, run_batch, CommonArgs};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::ReportKind;
use anyhow::Result;
use clap::Args;
use sitelang_api::{AcceptedLanguages, ApiError, DocumentInput, HeaderInput, MetaLanguageResolver};
use std::path::PathBuf;

/// Arguments for the meta command
#[derive(Debug, Args)]
pub struct MetaArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON header blob applied to every page (default: `<page>.headers.json`)
    #[arg(long, value_name = "FILE")]
    pub headers: Option<PathBuf>,

    /// Accepted language codes, comma separated (default: built-in list)
    #[arg(short, long, value_delimiter = ',', value_name = "CODES")]
    pub languages: Vec<String>,
}

impl MetaArgs {
    /// Execute the meta command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.common.verbose, self.common.quiet);
        log::info!("Resolving declared page languages");

        let config = CliConfig::load_or_default(self.common.config.as_deref())?;
        let languages = if self.languages.is_empty() {
            &config.detection.languages
        } else {
            &self.languages
        };
        let accepted = if languages.is_empty() {
            AcceptedLanguages::known()
        } else {
            AcceptedLanguages::new(languages)
        };
        let resolver = MetaLanguageResolver::new(accepted);

        run_batch(&self.common, &config, |path| {
            let body = DocumentInput::from(FileReader::read_page(path)?);
            let headers = match FileReader::headers_for(path, self.headers.as_deref())? {
                Some(raw) => HeaderInput::from(raw),
                None => HeaderInput::none(),
            };
            let declared = resolver
                .resolve_with_source(&headers, &body)
                .map_err(|e| CliError::from(ApiError::from(e)))?;
            Ok(ReportKind::Meta { declared })
        })
    }
}
