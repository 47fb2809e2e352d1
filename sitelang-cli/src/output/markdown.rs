//! Markdown output formatter

use super::{format_value, FileReport, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs a table with one row per file
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    file_count: usize,
    declared_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            file_count: 0,
            declared_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        if self.file_count == 0 {
            writeln!(self.writer, "| File | Language | Source | Distribution |")?;
            writeln!(self.writer, "|------|----------|--------|--------------|")?;
        }
        self.file_count += 1;

        let result = &report.result;
        if !matches!(result.source(), "statistical" | "none") {
            self.declared_count += 1;
        }
        let distribution = result
            .distribution()
            .into_iter()
            .map(|(label, value)| format!("{label} {}", format_value(value)))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            self.writer,
            "| {} | {} | {} | {} |",
            report.path.replace('|', "\\|"),
            result.language().unwrap_or("-"),
            result.source(),
            distribution
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total files: {}, declared: {}*",
            self.file_count, self.declared_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::*;

    #[test]
    fn test_markdown_table() {
        let mut formatter = MarkdownFormatter::new(Vec::new());
        formatter.format_report(&detect_report()).unwrap();
        formatter.format_report(&declared_report()).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.writer).unwrap();
        assert!(out.starts_with("| File | Language | Source | Distribution |"));
        assert!(out.contains("| page.txt | de | statistical | de 0.75, unk 0.25 |"));
        assert!(out.contains("| index.html | it | http-equiv |  |"));
        assert!(out.contains("*Total files: 2, declared: 1*"));
    }
}
