//! Report scenarios: the catalogue and running a single report.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::page_object::ListScreen;
use crate::pages::{ReportPage, ReportsPage};
use crate::result::HarnessResult;
use tracing::{debug, info};

/// The report catalogue renders its list or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Reports, |ctx| async move {
        let reports = ReportsPage::new(ctx.page().clone());
        reports.expect_reports_displayed().await?;
        let count = reports.row_count().await?;
        info!(reports = count, "report catalogue displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Open the report `key` from the catalogue (or directly when it is not
/// linked) and run it
pub async fn run_report(ctx: &TestContext, key: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Reports, |ctx| async move {
        let reports = ReportsPage::new(ctx.page().clone());
        let report = ReportPage::new(ctx.page().clone());
        let linked = reports.open_report(key).await?;
        if !linked {
            debug!(key, "report not linked; opening directly");
            report.goto(key).await?;
        }

        let ran = report.run_report().await?;
        report.expect_report_displayed().await?;
        let state = report.list_state().await?;
        info!(key, ran, ?state, "report opened");
        Ok(FeatureOutcome::completed_if(linked, "report not linked from the catalogue")
            .and(FeatureOutcome::completed_if(ran, "run button not shown")))
    })
    .await
}
