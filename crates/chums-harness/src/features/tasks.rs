//! Task scenarios: tasks and automations.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::page_object::{ListScreen, PageObject};
use crate::pages::{AutomationsPage, TasksPage};
use crate::result::HarnessResult;
use tracing::info;

/// The task list renders, including closed tasks
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Tasks, |ctx| async move {
        let tasks = TasksPage::new(ctx.page().clone());
        tasks.expect_tasks_displayed().await?;
        let closed = tasks.show_closed().await?;
        if closed {
            tasks.expect_tasks_displayed().await?;
        }
        let state = tasks.list_state().await?;
        info!(?state, "tasks displayed");
        Ok(FeatureOutcome::completed_if(closed, "closed tasks toggle not shown"))
    })
    .await
}

/// Create a task and check it is listed
pub async fn add_task(ctx: &TestContext, title: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Tasks, |ctx| async move {
        let tasks = TasksPage::new(ctx.page().clone());
        let before = tasks.row_count().await?;
        if !tasks.add_task(title).await? {
            return Ok(FeatureOutcome::completed_if(false, "add task not offered"));
        }
        expect_count(ctx.page(), &tasks.rows, before + 1).await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Automations reached from the task list
pub async fn display_automations(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Tasks, |ctx| async move {
        TasksPage::new(ctx.page().clone()).goto_automations().await?;
        let automations = AutomationsPage::new(ctx.page().clone());
        automations.expect_to_be_on_page().await?;
        automations.expect_automations_displayed().await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create an automation and check it is listed
pub async fn add_automation(ctx: &TestContext, title: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Automations, |ctx| async move {
        let automations = AutomationsPage::new(ctx.page().clone());
        let before = automations.row_count().await?;
        if !automations.add_automation(title).await? {
            return Ok(FeatureOutcome::completed_if(false, "add automation not offered"));
        }
        expect_count(ctx.page(), &automations.rows, before + 1).await?;
        let opened = automations.click_first_automation().await?;
        Ok(FeatureOutcome::completed_if(opened, "automation not openable"))
    })
    .await
}
