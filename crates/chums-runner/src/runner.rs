//! Command implementations: list, run and config

use crate::commands::{ConfigArgs, ListArgs, RunArgs};
use crate::config::{harness_config, CliConfig};
use crate::error::{CliError, CliResult};
use crate::output::{catalogue_lines, ProgressReporter};
use chums_harness::config::Timeouts;
use chums_harness::report::RunReport;
use chums_harness::{DriverFactory, HarnessConfig, SimulatedChms, SpecRegistry, SpecRunner};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Lines printed by `list`
pub fn list_specs(args: &ListArgs) -> CliResult<Vec<String>> {
    let cases = SpecRegistry::catalogue().select(args.suite.as_deref(), None);
    if cases.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "no specs in suite {:?}",
            args.suite.as_deref().unwrap_or_default()
        )));
    }
    Ok(catalogue_lines(&cases))
}

/// YAML printed by `config`
pub fn show_config(args: &ConfigArgs) -> CliResult<String> {
    let config = HarnessConfig::load(args.config.as_deref())?;
    Ok(serde_yaml_ng::to_string(&config)?)
}

/// Outcome of `run`: the report and where it was written
#[derive(Debug)]
pub struct RunSummary {
    /// Results of every selected spec
    pub report: RunReport,
    /// Path of the JSON report
    pub report_path: PathBuf,
}

/// Run the selected specs, write the JSON report and print the summary.
///
/// Returns [`CliError::SpecsFailed`] when any spec failed; specs that were
/// only degraded or not accessible do not fail the run.
pub fn run_specs(cli: &CliConfig, args: &RunArgs) -> CliResult<RunSummary> {
    if args.jobs == 0 {
        return Err(CliError::invalid_argument("--jobs must be at least 1"));
    }
    let mut config = harness_config(args)?;
    if args.simulated {
        config = config.with_timeouts(Timeouts::fast());
    }

    let cases = SpecRegistry::catalogue().select(args.suite.as_deref(), args.filter.as_deref());
    if cases.is_empty() {
        return Err(CliError::invalid_argument("no specs match the given suite and filter"));
    }

    let mut reporter = ProgressReporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    reporter.header(&format!("Running {} specs against {}", cases.len(), config.base_url));

    let runtime = tokio::runtime::Runtime::new()?;
    let (report, report_dir) = runtime.block_on(async {
        let factory = driver_factory(&config, args.simulated).await?;
        let runner = SpecRunner::new(factory, config.clone())
            .with_jobs(args.jobs)
            .with_fail_fast(args.fail_fast);

        reporter.start_progress(cases.len() as u64, "specs");
        let report = runner.run_with(&cases, |result| reporter.spec_finished(result)).await;
        reporter.finish();
        runner.shutdown().await;

        let dir = runner.artifacts_dir(&report);
        Ok::<_, CliError>((report, dir))
    })?;

    let report_path = report.write_json(&report_dir)?;
    info!(path = %report_path.display(), "report written");
    reporter.summary(&report);
    reporter.info(&format!("report: {}", report_path.display()));

    let failed = report.failures().len();
    if failed > 0 {
        return Err(CliError::SpecsFailed {
            failed,
            total: report.total(),
        });
    }
    Ok(RunSummary { report, report_path })
}

async fn driver_factory(config: &HarnessConfig, simulated: bool) -> CliResult<Arc<dyn DriverFactory>> {
    if simulated {
        let app = SimulatedChms::new()
            .with_base_url(config.base_url.clone())
            .with_credentials(config.credentials.clone())
            .with_churches(&[config.church.as_str()]);
        return Ok(Arc::new(app.factory()));
    }
    browser_factory(config).await
}

#[cfg(feature = "browser")]
async fn browser_factory(config: &HarnessConfig) -> CliResult<Arc<dyn DriverFactory>> {
    let factory = chums_harness::CdpDriverFactory::launch(config).await?;
    Ok(Arc::new(factory))
}

#[cfg(not(feature = "browser"))]
async fn browser_factory(_config: &HarnessConfig) -> CliResult<Arc<dyn DriverFactory>> {
    Err(CliError::config(
        "built without the browser feature; rebuild with --features browser or pass --simulated",
    ))
}
