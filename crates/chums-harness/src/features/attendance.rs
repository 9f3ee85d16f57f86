//! Attendance scenarios: setup tabs and campuses.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::page_object::ListScreen;
use crate::pages::AttendancePage;
use crate::result::HarnessResult;
use tracing::info;

/// Tabs on the attendance screen
pub const TABS: [&str; 3] = ["Setup", "Attendance", "Groups"];

/// Visit each tab; the screen must stay displayed throughout
pub async fn tabs(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Attendance, |ctx| async move {
        let attendance = AttendancePage::new(ctx.page().clone());
        attendance.expect_attendance_displayed().await?;
        let mut outcome = FeatureOutcome::Completed;
        for tab in TABS {
            let opened = attendance.open_tab(tab).await?;
            outcome = outcome.and(FeatureOutcome::completed_if(opened, &format!("{tab} tab not shown")));
        }
        attendance.expect_attendance_displayed().await?;
        Ok(outcome)
    })
    .await
}

/// Create a campus and check it is listed
pub async fn add_campus(ctx: &TestContext, name: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Attendance, |ctx| async move {
        let attendance = AttendancePage::new(ctx.page().clone());
        let before = attendance.row_count().await?;
        if !attendance.add_campus(name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add campus not offered"));
        }
        expect_count(ctx.page(), &attendance.rows, before + 1).await?;
        info!(name, "campus added");
        Ok(FeatureOutcome::Completed)
    })
    .await
}
