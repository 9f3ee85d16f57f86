//! Run report: one [`SpecResult`] per spec, serialized as JSON.

use crate::features::FeatureOutcome;
use crate::result::{HarnessError, HarnessResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// File name of the report inside the artifacts directory
pub const REPORT_FILE: &str = "report.json";

/// How a spec ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecStatus {
    /// Every step completed
    Passed,
    /// Finished, but some optional part was unavailable
    Degraded,
    /// The feature bounced to login
    NotAccessible,
    /// An assertion or the driver failed
    Failed,
    /// Not run because an earlier spec failed in fail-fast mode
    Skipped,
}

impl SpecStatus {
    /// Status for a scenario that returned `outcome`
    #[must_use]
    pub const fn from_outcome(outcome: &FeatureOutcome) -> Self {
        match outcome {
            FeatureOutcome::Completed => Self::Passed,
            FeatureOutcome::Degraded { .. } => Self::Degraded,
            FeatureOutcome::NotAccessible { .. } => Self::NotAccessible,
        }
    }

    /// Check if status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short label for terminal output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Degraded => "DEGRADED",
            Self::NotAccessible => "N/A",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// Result of one spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecResult {
    /// Spec name, `suite::scenario`
    pub name: String,
    /// Suite name
    pub suite: String,
    /// Final status
    pub status: SpecStatus,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Why a spec was degraded or not accessible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Error text of a failed spec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Screenshot taken when the spec failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl SpecResult {
    fn new(name: &str, suite: &str, status: SpecStatus, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            suite: suite.to_string(),
            status,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            detail: None,
            error: None,
            screenshot: None,
        }
    }

    /// Result of a scenario that returned an outcome
    #[must_use]
    pub fn from_outcome(name: &str, suite: &str, outcome: &FeatureOutcome, duration: Duration) -> Self {
        let mut result = Self::new(name, suite, SpecStatus::from_outcome(outcome), duration);
        result.detail = match outcome {
            FeatureOutcome::Completed => None,
            other => Some(other.to_string()),
        };
        result
    }

    /// Result of a scenario that returned an error
    #[must_use]
    pub fn failed(name: &str, suite: &str, error: &HarnessError, duration: Duration) -> Self {
        let mut result = Self::new(name, suite, SpecStatus::Failed, duration);
        result.error = Some(error.to_string());
        result
    }

    /// A spec that never ran
    #[must_use]
    pub fn skipped(name: &str, suite: &str) -> Self {
        Self::new(name, suite, SpecStatus::Skipped, Duration::ZERO)
    }

    /// Attach the failure screenshot
    #[must_use]
    pub fn with_screenshot(mut self, path: PathBuf) -> Self {
        self.screenshot = Some(path);
        self
    }
}

/// Results of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run id, also the artifacts subdirectory
    pub run_id: Uuid,
    /// App under test
    pub base_url: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the last spec finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Results in completion order
    pub results: Vec<SpecResult>,
}

impl RunReport {
    /// Empty report starting now
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            base_url: base_url.into(),
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
        }
    }

    /// Add a result
    pub fn record(&mut self, result: SpecResult) {
        self.results.push(result);
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of results with `status`
    #[must_use]
    pub fn count(&self, status: SpecStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Get total result count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True unless some spec failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.iter().any(|r| r.status.is_failed())
    }

    /// Failed specs
    #[must_use]
    pub fn failures(&self) -> Vec<&SpecResult> {
        self.results.iter().filter(|r| r.status.is_failed()).collect()
    }

    /// Wall time between start and finish
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} specs: {} passed, {} degraded, {} not accessible, {} failed, {} skipped",
            self.total(),
            self.count(SpecStatus::Passed),
            self.count(SpecStatus::Degraded),
            self.count(SpecStatus::NotAccessible),
            self.count(SpecStatus::Failed),
            self.count(SpecStatus::Skipped),
        )
    }

    /// Pretty JSON
    pub fn to_json(&self) -> HarnessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write [`REPORT_FILE`] into `dir`, creating it, and return the path
    pub fn write_json(&self, dir: &Path) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(REPORT_FILE);
        std::fs::write(&path, self.to_json()?)?;
        Ok(path)
    }

    /// Read a report written by [`Self::write_json`]
    pub fn read_json(path: &Path) -> HarnessResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        let mut report = RunReport::new("http://localhost:3000");
        report.record(SpecResult::from_outcome(
            "auth::login",
            "auth",
            &FeatureOutcome::Completed,
            Duration::from_millis(120),
        ));
        report.record(SpecResult::from_outcome(
            "groups::display",
            "groups",
            &FeatureOutcome::NotAccessible {
                feature: crate::features::Feature::Groups,
            },
            Duration::from_millis(40),
        ));
        report.record(
            SpecResult::failed(
                "donations::create_non_deductible_fund",
                "donations",
                &HarnessError::assertion("expected 1 match, found 0"),
                Duration::from_millis(900),
            )
            .with_screenshot(PathBuf::from("shots/donations.png")),
        );
        report.record(SpecResult::skipped("forms::display", "forms"));
        report
    }

    mod status_tests {
        use super::*;

        #[test]
        fn test_status_from_outcome() {
            assert_eq!(SpecStatus::from_outcome(&FeatureOutcome::Completed), SpecStatus::Passed);
            assert_eq!(
                SpecStatus::from_outcome(&FeatureOutcome::completed_if(false, "no button")),
                SpecStatus::Degraded
            );
        }

        #[test]
        fn test_status_serializes_snake_case() {
            let json = serde_json::to_string(&SpecStatus::NotAccessible).unwrap();
            assert_eq!(json, "\"not_accessible\"");
        }
    }

    mod report_tests {
        use super::*;

        #[test]
        fn test_counts_and_summary() {
            let report = report();
            assert_eq!(report.total(), 4);
            assert_eq!(report.count(SpecStatus::Passed), 1);
            assert_eq!(report.count(SpecStatus::NotAccessible), 1);
            assert!(!report.all_passed());
            assert_eq!(report.failures().len(), 1);
            assert_eq!(
                report.summary(),
                "4 specs: 1 passed, 0 degraded, 1 not accessible, 1 failed, 1 skipped"
            );
        }

        #[test]
        fn test_not_accessible_is_not_a_failure() {
            let mut report = RunReport::new("http://localhost:3000");
            report.record(SpecResult::from_outcome(
                "plans::display",
                "plans",
                &FeatureOutcome::NotAccessible {
                    feature: crate::features::Feature::Plans,
                },
                Duration::ZERO,
            ));
            assert!(report.all_passed());
            assert!(report.results[0].detail.is_some());
        }

        #[test]
        fn test_write_then_read() {
            let dir = tempfile::tempdir().unwrap();
            let mut report = report();
            report.finish();
            let path = report.write_json(&dir.path().join("run")).unwrap();
            assert!(path.ends_with(REPORT_FILE));

            let loaded = RunReport::read_json(&path).unwrap();
            assert_eq!(loaded.run_id, report.run_id);
            assert_eq!(loaded.results, report.results);
            assert!(loaded.elapsed().is_some());
        }

        #[test]
        fn test_passed_result_omits_optional_fields() {
            let result = SpecResult::from_outcome("a::b", "a", &FeatureOutcome::Completed, Duration::ZERO);
            let json = serde_json::to_value(&result).unwrap();
            assert!(json.get("error").is_none());
            assert!(json.get("screenshot").is_none());
            assert_eq!(json["status"], "passed");
        }
    }
}
