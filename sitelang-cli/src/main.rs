//! sitelang command-line entry point

use anyhow::Result;
use clap::Parser;
use sitelang_cli::commands::Commands;

/// Site language detection for crawled pages
#[derive(Debug, Parser)]
#[command(name = "sitelang", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
