//! Analyze command implementation

use super::{init_logging, run_batch, CommonArgs, DetectionArgs};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::ReportKind;
use anyhow::Result;
use clap::Args;
use sitelang_api::{DocumentInput, HeaderInput, PageAnalyzer, ParsedDocument};
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,

    /// JSON header blob applied to every page (default: `<page>.headers.json`)
    #[arg(long, value_name = "FILE")]
    pub headers: Option<PathBuf>,

    /// Site domain; when given, script sources are classified too
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.common.verbose, self.common.quiet);
        log::info!("Starting page analysis");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.common.config.as_deref())?;
        let analyzer = PageAnalyzer::with_config(self.detection.to_config(&config)?)
            .map_err(CliError::from)?;

        run_batch(&self.common, &config, |path| {
            let doc = ParsedDocument::parse(&FileReader::read_page(path)?);
            if !doc.is_well_formed() {
                log::debug!(
                    "{}: {} markup error(s)",
                    path.display(),
                    doc.parse_errors().count()
                );
            }
            let headers = match FileReader::headers_for(path, self.headers.as_deref())? {
                Some(raw) => HeaderInput::from(raw),
                None => HeaderInput::none(),
            };

            let report = analyzer
                .analyze_document(&headers, &doc)
                .map_err(CliError::from)?;
            let scripts = self.domain.as_deref().map(|domain| {
                let body = DocumentInput::from(doc);
                analyzer.scripts(domain, &body)
            });
            Ok(ReportKind::Analyze { report, scripts })
        })
    }
}
