//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_patterns;
use crate::output::{
    FileReport, JsonFormatter, MarkdownFormatter, OutputFormatter, ReportKind, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod analyze;
pub mod detect;
pub mod generate_config;
pub mod meta;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the language distribution of plain text files
    Detect(detect::DetectArgs),

    /// Report the language a page declares in markup or headers
    Meta(meta::MetaArgs),

    /// Declared language first, statistical detection as fallback
    Analyze(analyze::AnalyzeArgs),

    /// Write a configuration file with the default settings
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Detect(args) => args.execute(),
            Commands::Meta(args) => args.execute(),
            Commands::Analyze(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List accepted language codes
    Languages,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) -> Result<()> {
        let mut out = io::stdout().lock();
        match self {
            ListCommands::Languages => {
                for code in sitelang_api::KNOWN_LANG_TAGS {
                    writeln!(out, "{code}")?;
                }
            }
            ListCommands::Formats => {
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        writeln!(out, "{:<10} {}", value.get_name(), format.description())?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per file
    Text,
    /// JSON array of file reports
    Json,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "tab-separated line per file",
            OutputFormat::Json => "JSON array with full reports",
            OutputFormat::Markdown => "markdown table with a summary",
        }
    }
}

/// Supported presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Fewer windows and trials, low accuracy classifier
    Fast,
    /// Default settings
    Balanced,
    /// More windows and trials
    Thorough,
}

/// Window execution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Classify windows on one thread
    Sequential,
    /// Classify windows across threads
    Parallel,
    /// Decide from the number of windows
    Adaptive,
}

impl From<Mode> for sitelang_api::ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sequential => sitelang_api::ExecutionMode::Sequential,
            Mode::Parallel => sitelang_api::ExecutionMode::Parallel,
            Mode::Adaptive => sitelang_api::ExecutionMode::Adaptive,
        }
    }
}

/// Arguments shared by every batch command
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SITELANG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments controlling statistical detection
#[derive(Debug, Args)]
pub struct DetectionArgs {
    /// Accepted language codes, comma separated (default: built-in list)
    #[arg(short, long, value_delimiter = ',', value_name = "CODES")]
    pub languages: Vec<String>,

    /// Settings preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Window execution mode
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Worker threads for window classification
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Fixed classifier seed
    #[arg(long, value_name = "SEED", conflicts_with = "random")]
    pub seed: Option<u64>,

    /// Fresh classifier seed per document
    #[arg(long)]
    pub random: bool,

    /// Report window counts instead of shares
    #[arg(long)]
    pub counts: bool,

    /// Leave the unknown bucket out of the distribution
    #[arg(long)]
    pub no_unknown: bool,

    /// Include per-window records (JSON output)
    #[arg(long)]
    pub windows: bool,

    /// Use the low accuracy classifier
    #[arg(long)]
    pub low_accuracy: bool,

    /// Keep links and e-mail addresses in the text
    #[arg(long)]
    pub keep_urls: bool,
}

impl DetectionArgs {
    /// Merge file configuration and flags into an API configuration
    pub fn to_config(&self, file: &CliConfig) -> Result<sitelang_api::Config> {
        let detection = &file.detection;
        let preset = match self.preset {
            Some(preset) => preset,
            None => Preset::from_str(&detection.preset, true).map_err(|_| {
                CliError::ConfigError(format!("unknown preset '{}'", detection.preset))
            })?,
        };

        let mut builder = sitelang_api::Config::builder();
        builder = match preset {
            Preset::Fast => builder.fast(),
            Preset::Balanced => builder,
            Preset::Thorough => builder.thorough(),
        };

        let languages = if self.languages.is_empty() {
            &detection.languages
        } else {
            &self.languages
        };
        if !languages.is_empty() {
            builder = builder.languages(languages).map_err(CliError::from)?;
        }

        if let Some(words) = detection.window_words {
            builder = builder.window_words(words);
        }
        if let Some(count) = detection.sample_count {
            builder = builder.sample_count(count);
        }
        if let Some(threshold) = detection.threshold {
            builder = builder.threshold(threshold);
        }
        if let Some(trials) = detection.trials {
            builder = builder.trials(trials);
        }

        if self.random || (detection.randomized && self.seed.is_none()) {
            builder = builder.randomized();
        } else if let Some(seed) = self.seed.or(detection.seed) {
            builder = builder.seed(seed);
        }

        if self.counts || detection.counts {
            builder = builder.counts();
        }
        builder = builder
            .include_unknown(detection.include_unknown && !self.no_unknown)
            .keep_windows(self.windows || file.output.include_windows);

        if self.low_accuracy || detection.low_accuracy {
            builder = builder.low_accuracy(true);
        }
        builder = builder.strip_urls(detection.strip_urls && !self.keep_urls);

        let mode = match self.mode {
            Some(mode) => mode.into(),
            None => file
                .performance
                .execution_mode
                .parse::<sitelang_api::ExecutionMode>()
                .map_err(CliError::ConfigError)?,
        };
        let threads = self.threads.or(match file.performance.worker_threads {
            0 => None,
            n => Some(n),
        });
        builder = builder.execution_mode(mode).threads(threads);

        Ok(builder.build().map_err(CliError::from)?)
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Resolve the output format from flags and configuration
pub fn output_format(common: &CommonArgs, config: &CliConfig) -> Result<OutputFormat> {
    match common.format {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        }),
    }
}

/// Build the formatter writing to `output` or stdout
pub fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
    pretty_json: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write + Send + Sync> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    })
}

/// Run `process` over every input file and write the reports in input order
///
/// Files are processed in parallel. A failing file is logged and skipped;
/// the command fails after writing the remaining reports.
pub fn run_batch<F>(common: &CommonArgs, config: &CliConfig, process: F) -> Result<()>
where
    F: Fn(&Path) -> Result<ReportKind> + Sync,
{
    let files = resolve_patterns(&common.input)?;
    let format = output_format(common, config)?;
    let progress = ProgressReporter::new(common.quiet, files.len());

    let results: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|path| {
            let result = process(path)
                .with_context(|| format!("Failed to process {}", path.display()));
            progress.file_completed(&path.display().to_string());
            result.map(|result| FileReport {
                path: path.display().to_string(),
                result,
            })
        })
        .collect();
    progress.finish();

    let mut formatter = create_formatter(format, common.output.as_deref(), config.output.pretty_json)?;
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(report) => formatter.format_report(report)?,
            Err(e) => {
                failed += 1;
                log::error!("{e:#}");
            }
        }
    }
    formatter.finish()?;

    log::info!("Processed {} file(s), {} failed", results.len(), failed);
    if failed > 0 {
        return Err(CliError::DetectionError(format!(
            "{failed} of {} file(s) failed",
            results.len()
        ))
        .into());
    }
    Ok(())
}
