//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists, pass --force to overwrite",
                self.output.display()
            );
        }

        let template = Self::generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!(
            "  Use it with: sitelang analyze -i 'pages/*.html' --config {}",
            self.output.display()
        );
        Ok(())
    }

    /// Default configuration rendered as TOML
    fn generate_template() -> Result<String> {
        Ok(format!(
            "# sitelang configuration\n# Command-line flags override these values.\n\n{}",
            CliConfig::default().to_toml()?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_template_loads() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("sitelang.toml");

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };
        args.execute().unwrap();

        let loaded = CliConfig::load(&output).unwrap();
        assert_eq!(loaded, CliConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("sitelang.toml");
        fs::write(&output, "keep me").unwrap();

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: true,
        };
        assert!(args.execute().is_ok());
    }
}
