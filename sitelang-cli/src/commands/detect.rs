//! Detect command implementation

use super::{init_logging, run_batch, CommonArgs, DetectionArgs};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::ReportKind;
use anyhow::Result;
use clap::Args;
use sitelang_api::PageAnalyzer;

/// Arguments for the detect command
#[derive(Debug, Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.common.verbose, self.common.quiet);
        log::info!("Starting text language detection");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.common.config.as_deref())?;
        let analyzer = PageAnalyzer::with_config(self.detection.to_config(&config)?)
            .map_err(CliError::from)?;

        run_batch(&self.common, &config, |path| {
            let text = FileReader::read_text(path)?;
            let report = analyzer.detect_text(&text).map_err(CliError::from)?;
            log::debug!(
                "{}: {} window(s), dominant {:?}",
                path.display(),
                report.metadata.window_count,
                report.dominant
            );
            Ok(ReportKind::Detect { report })
        })
    }
}
