//! Spec runner.
//!
//! Runs catalogue cases against pages from a [`DriverFactory`], each spec on
//! its own fresh page and [`TestContext`]. Up to `jobs` specs run at once.
//! In fail-fast mode, specs that have not started when a failure is recorded
//! are reported as skipped.

use crate::config::HarnessConfig;
use crate::context::TestContext;
use crate::driver::DriverFactory;
use crate::page::Page;
use crate::report::{RunReport, SpecResult, SpecStatus};
use crate::specs::SpecCase;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs specs and collects a [`RunReport`]
pub struct SpecRunner {
    factory: Arc<dyn DriverFactory>,
    config: HarnessConfig,
    jobs: usize,
    fail_fast: bool,
}

impl std::fmt::Debug for SpecRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecRunner")
            .field("base_url", &self.config.base_url)
            .field("jobs", &self.jobs)
            .field("fail_fast", &self.fail_fast)
            .finish_non_exhaustive()
    }
}

impl SpecRunner {
    /// Sequential runner that keeps going after failures
    #[must_use]
    pub fn new(factory: Arc<dyn DriverFactory>, config: HarnessConfig) -> Self {
        Self {
            factory,
            config,
            jobs: 1,
            fail_fast: false,
        }
    }

    /// Run up to `jobs` specs concurrently (at least one)
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Stop starting new specs after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Configuration every page is created with
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Where artifacts of `report`'s run go
    #[must_use]
    pub fn artifacts_dir(&self, report: &RunReport) -> PathBuf {
        self.config.artifacts_dir.join(report.run_id.to_string())
    }

    /// Run `cases` and return the report
    pub async fn run(&self, cases: &[SpecCase]) -> RunReport {
        self.run_with(cases, |_| {}).await
    }

    /// Run `cases`, calling `on_result` as each spec finishes
    pub async fn run_with(&self, cases: &[SpecCase], mut on_result: impl FnMut(&SpecResult)) -> RunReport {
        let mut report = RunReport::new(self.config.base_url.clone());
        let dir = self.artifacts_dir(&report);
        let stop = AtomicBool::new(false);
        info!(run_id = %report.run_id, specs = cases.len(), jobs = self.jobs, "run started");

        let mut results = stream::iter(cases.iter().map(|case| self.guarded(case, &stop, &dir)))
            .buffer_unordered(self.jobs);
        while let Some(result) = results.next().await {
            on_result(&result);
            report.record(result);
        }

        report.finish();
        info!(run_id = %report.run_id, summary = %report.summary(), "run finished");
        report
    }

    async fn guarded(&self, case: &SpecCase, stop: &AtomicBool, dir: &Path) -> SpecResult {
        if stop.load(Ordering::SeqCst) {
            debug!(spec = case.name, "skipped after an earlier failure");
            return SpecResult::skipped(case.name, case.suite);
        }
        let result = self.run_case(case, dir).await;
        if self.fail_fast && result.status == SpecStatus::Failed {
            stop.store(true, Ordering::SeqCst);
        }
        result
    }

    /// Run one spec on a fresh page; failures are captured in the result,
    /// with a screenshot under `dir` when one could be taken
    pub async fn run_case(&self, case: &SpecCase, dir: &Path) -> SpecResult {
        let started = Instant::now();
        let driver = match self.factory.new_driver().await {
            Ok(driver) => driver,
            Err(error) => {
                warn!(spec = case.name, %error, "could not open a page");
                return SpecResult::failed(case.name, case.suite, &error, started.elapsed());
            }
        };
        let page = Page::new(driver, self.config.clone());
        let ctx = TestContext::new(page.clone(), case.name);

        let result = match (case.run)(ctx).await {
            Ok(outcome) => {
                info!(spec = case.name, %outcome, "spec finished");
                SpecResult::from_outcome(case.name, case.suite, &outcome, started.elapsed())
            }
            Err(error) => {
                warn!(spec = case.name, %error, "spec failed");
                let failed = SpecResult::failed(case.name, case.suite, &error, started.elapsed());
                match capture(&page, case.name, dir).await {
                    Some(path) => failed.with_screenshot(path),
                    None => failed,
                }
            }
        };

        if let Err(error) = page.close().await {
            debug!(spec = case.name, %error, "page close failed");
        }
        result
    }

    /// Release the factory's shared resources
    pub async fn shutdown(&self) {
        if let Err(error) = self.factory.shutdown().await {
            warn!(%error, "driver shutdown failed");
        }
    }
}

/// File name for a spec's screenshot: `auth::login` -> `auth-login.png`
#[must_use]
pub fn screenshot_name(spec: &str) -> String {
    let stem: String = spec
        .replace("::", "-")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.png")
}

async fn capture(page: &Page, spec: &str, dir: &Path) -> Option<PathBuf> {
    let png = match page.screenshot().await {
        Ok(png) => png,
        Err(error) => {
            debug!(spec, %error, "no failure screenshot");
            return None;
        }
    };
    let path = dir.join(screenshot_name(spec));
    let written = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, png).await
    };
    match written.await {
        Ok(()) => Some(path),
        Err(error) => {
            warn!(spec, path = %path.display(), %error, "could not save screenshot");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Timeouts;
    use crate::features::FeatureOutcome;
    use crate::mock::{Access, MockApp, MockDriverFactory, MockElement, PNG_SIGNATURE};
    use crate::result::HarnessError;

    fn factory() -> Arc<dyn DriverFactory> {
        let app = MockApp::new().screen("/", Access::Public, |_| {
            vec![MockElement::new("h").css("h1").text("Home")]
        });
        Arc::new(MockDriverFactory::new(app))
    }

    fn config(dir: &Path) -> HarnessConfig {
        HarnessConfig::default()
            .with_timeouts(Timeouts::fast())
            .with_artifacts_dir(dir)
    }

    fn case(name: &'static str, run: crate::specs::SpecFn) -> SpecCase {
        SpecCase {
            name,
            suite: "unit",
            smoke: false,
            run,
        }
    }

    fn passes() -> SpecCase {
        case("unit::passes", |_| Box::pin(async { Ok(FeatureOutcome::Completed) }))
    }

    fn fails() -> SpecCase {
        case("unit::fails", |ctx| {
            Box::pin(async move {
                ctx.page().goto("/").await?;
                Err(HarnessError::assertion("boom"))
            })
        })
    }

    fn gated() -> SpecCase {
        case("unit::gated", |_| {
            Box::pin(async {
                Ok(FeatureOutcome::NotAccessible {
                    feature: crate::features::Feature::Groups,
                })
            })
        })
    }

    mod naming_tests {
        use super::*;

        #[test]
        fn test_screenshot_name() {
            assert_eq!(screenshot_name("auth::login"), "auth-login.png");
            assert_eq!(screenshot_name("donations::fund crud"), "donations-fund_crud.png");
        }
    }

    mod run_tests {
        use super::*;

        #[tokio::test]
        async fn test_statuses_recorded() {
            let tmp = tempfile::tempdir().unwrap();
            let runner = SpecRunner::new(factory(), config(tmp.path()));
            let report = runner.run(&[passes(), gated(), fails()]).await;

            assert_eq!(report.total(), 3);
            assert_eq!(report.count(SpecStatus::Passed), 1);
            assert_eq!(report.count(SpecStatus::NotAccessible), 1);
            assert_eq!(report.count(SpecStatus::Failed), 1);
            assert!(report.finished_at.is_some());
        }

        #[tokio::test]
        async fn test_failure_screenshot_written() {
            let tmp = tempfile::tempdir().unwrap();
            let runner = SpecRunner::new(factory(), config(tmp.path()));
            let report = runner.run(&[fails()]).await;

            let failure = &report.results[0];
            assert!(failure.error.as_deref().unwrap().contains("boom"));
            let shot = failure.screenshot.as_ref().unwrap();
            assert!(shot.starts_with(runner.artifacts_dir(&report)));
            assert_eq!(std::fs::read(shot).unwrap(), PNG_SIGNATURE.to_vec());
        }

        #[tokio::test]
        async fn test_fail_fast_skips_remaining() {
            let tmp = tempfile::tempdir().unwrap();
            let runner = SpecRunner::new(factory(), config(tmp.path())).with_fail_fast(true);
            let report = runner.run(&[fails(), passes(), gated()]).await;

            assert_eq!(report.count(SpecStatus::Failed), 1);
            assert_eq!(report.count(SpecStatus::Skipped), 2);
        }

        #[tokio::test]
        async fn test_parallel_jobs_run_everything() {
            let tmp = tempfile::tempdir().unwrap();
            let runner = SpecRunner::new(factory(), config(tmp.path())).with_jobs(4);
            let cases = [passes(), gated(), passes(), gated(), passes()];
            let mut seen = 0;
            let report = runner.run_with(&cases, |_| seen += 1).await;

            assert_eq!(seen, 5);
            assert_eq!(report.total(), 5);
            assert!(report.all_passed());
        }

        #[test]
        fn test_jobs_at_least_one() {
            let runner = SpecRunner::new(factory(), HarnessConfig::default()).with_jobs(0);
            assert_eq!(runner.jobs, 1);
        }
    }
}
