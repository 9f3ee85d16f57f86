//! Output formatting and progress reporting

use chums_harness::report::{RunReport, SpecResult, SpecStatus};
use chums_harness::SpecCase;
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for a spec run
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar for `total` specs
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.use_color {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Report one finished spec
    pub fn spec_finished(&self, result: &SpecResult) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
        if self.quiet && !result.status.is_failed() {
            return;
        }
        self.line(&result_line(result, self.use_color));
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        self.line("");
        self.line(&styled);
    }

    /// Print the run summary and where the report went
    pub fn summary(&self, report: &RunReport) {
        self.line("");
        let failed = report.count(SpecStatus::Failed);
        let seconds = report
            .elapsed()
            .and_then(|d| d.to_std().ok())
            .map_or(0.0, |d| d.as_secs_f64());

        let status = if failed > 0 { "FAILED" } else { "PASSED" };
        let status = if self.use_color {
            let style = if failed > 0 {
                Style::new().red().bold()
            } else {
                Style::new().green().bold()
            };
            style.apply_to(status).to_string()
        } else {
            status.to_string()
        };
        self.line(&format!("{status} {} in {seconds:.2}s", report.summary()));

        for failure in report.failures() {
            if let Some(path) = &failure.screenshot {
                self.line(&format!("  screenshot for {}: {}", failure.name, path.display()));
            }
        }
    }

    fn line(&self, text: &str) {
        match self.progress_bar {
            Some(ref pb) if !pb.is_finished() => pb.println(text),
            _ => {
                let _ = self.term.write_line(text);
            }
        }
    }
}

/// One line per finished spec: status, name, time, then detail or error
#[must_use]
pub fn result_line(result: &SpecResult, use_color: bool) -> String {
    let label = result.status.label();
    let label = if use_color {
        let style = match result.status {
            SpecStatus::Passed => Style::new().green().bold(),
            SpecStatus::Degraded | SpecStatus::NotAccessible => Style::new().yellow().bold(),
            SpecStatus::Failed => Style::new().red().bold(),
            SpecStatus::Skipped => Style::new().dim(),
        };
        style.apply_to(format!("{label:<8}")).to_string()
    } else {
        format!("{label:<8}")
    };

    let mut line = format!("{label} {} ({}ms)", result.name, result.duration_ms);
    if let Some(note) = result.error.as_ref().or(result.detail.as_ref()) {
        line.push_str(" - ");
        line.push_str(note);
    }
    line
}

/// Catalogue listing, one spec per line
#[must_use]
pub fn catalogue_lines(cases: &[SpecCase]) -> Vec<String> {
    let width = cases.iter().map(|c| c.name.len()).max().unwrap_or(0);
    cases
        .iter()
        .map(|case| {
            let tag = if case.smoke { "  [smoke]" } else { "" };
            format!("{:<width$}  {}{tag}", case.name, case.suite)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chums_harness::{FeatureOutcome, HarnessError, SpecRegistry};
    use std::time::Duration;

    mod line_tests {
        use super::*;

        #[test]
        fn test_passed_line() {
            let result = SpecResult::from_outcome(
                "auth::login_and_select_church",
                "auth",
                &FeatureOutcome::Completed,
                Duration::from_millis(812),
            );
            assert_eq!(
                result_line(&result, false),
                "PASS     auth::login_and_select_church (812ms)"
            );
        }

        #[test]
        fn test_failed_line_carries_error() {
            let result = SpecResult::failed(
                "donations::fund_crud",
                "donations",
                &HarnessError::assertion("fund still listed"),
                Duration::from_millis(5),
            );
            let line = result_line(&result, false);
            assert!(line.starts_with("FAIL"));
            assert!(line.ends_with("Assertion failed: fund still listed"));
        }

        #[test]
        fn test_degraded_line_carries_reason() {
            let result = SpecResult::from_outcome(
                "settings::display",
                "settings",
                &FeatureOutcome::completed_if(false, "church settings not editable"),
                Duration::ZERO,
            );
            assert!(result_line(&result, false).contains("church settings not editable"));
        }
    }

    mod catalogue_tests {
        use super::*;

        #[test]
        fn test_every_case_listed() {
            let registry = SpecRegistry::catalogue();
            let lines = catalogue_lines(registry.cases());
            assert_eq!(lines.len(), registry.cases().len());
            assert!(lines.iter().any(|l| l.contains("[smoke]")));
            assert!(lines[0].starts_with("auth::"));
        }

        #[test]
        fn test_empty_catalogue() {
            assert!(catalogue_lines(&[]).is_empty());
        }
    }
}
