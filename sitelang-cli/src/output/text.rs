//! Plain text output formatter

use super::{format_value, FileReport, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter - one tab-separated line per file
///
/// `path`, language (`-` when none), source, then `label=value` pairs.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        let result = &report.result;
        write!(
            self.writer,
            "{}\t{}\t{}",
            report.path,
            result.language().unwrap_or("-"),
            result.source()
        )?;
        for (label, value) in result.distribution() {
            write!(self.writer, "\t{label}={}", format_value(value))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::*;

    #[test]
    fn test_text_lines() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_report(&detect_report()).unwrap();
        formatter.format_report(&declared_report()).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.writer).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "page.txt\tde\tstatistical\tde=0.75\tunk=0.25");
        assert_eq!(lines[1], "index.html\tit\thttp-equiv");
    }
}
