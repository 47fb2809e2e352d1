//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages {msg}";

/// Progress reporter for batch detection
///
/// Shared by reference across worker threads.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter; `quiet` or a single file disables the bar
    pub fn new(quiet: bool, total_files: usize) -> Self {
        if quiet || total_files < 2 {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_files as u64);
        match ProgressStyle::with_template(TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => log::debug!("Falling back to default progress style: {e}"),
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// Whether a bar is shown
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Update progress for a completed file
    pub fn file_completed(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {filename}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_and_single_file_have_no_bar() {
        assert!(!ProgressReporter::new(true, 10).is_active());
        assert!(!ProgressReporter::new(false, 1).is_active());
    }

    #[test]
    fn test_bar_counts_files() {
        let reporter = ProgressReporter::new(false, 3);
        assert!(reporter.is_active());
        reporter.file_completed("a.html");
        reporter.file_completed("b.html");
        assert_eq!(reporter.progress_bar.as_ref().unwrap().position(), 2);
        reporter.finish();
    }
}
