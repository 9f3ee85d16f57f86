//! Serving plan scenarios: ministries, plans and positions.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::page_object::ListScreen;
use crate::pages::{MinistryPage, PlanPage, PlansPage};
use crate::result::{HarnessError, HarnessResult};
use tracing::info;

/// The ministry list renders its entries or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Plans, |ctx| async move {
        let plans = PlansPage::new(ctx.page().clone());
        plans.expect_plans_displayed().await?;
        let ministries = plans.row_count().await?;
        info!(ministries, "ministries displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Open the first ministry and, if it has one, its first plan
pub async fn open_first(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Plans, |ctx| async move {
        let plans = PlansPage::new(ctx.page().clone());
        if !plans.click_first_ministry().await? {
            return Ok(FeatureOutcome::completed_if(false, "no ministries listed"));
        }
        let ministry = MinistryPage::new(ctx.page().clone());
        ministry.expect_ministry_displayed().await?;
        if !ministry.click_first_plan().await? {
            return Ok(FeatureOutcome::completed_if(false, "ministry has no plans"));
        }
        PlanPage::new(ctx.page().clone()).expect_plan_displayed().await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a ministry, a plan inside it and a position on the plan
pub async fn build_plan(
    ctx: &TestContext,
    ministry_name: &str,
    plan_name: &str,
    position: &str,
) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Plans, |ctx| async move {
        let page = ctx.page().clone();
        let plans = PlansPage::new(page.clone());
        if !plans.add_ministry(ministry_name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add ministry not offered"));
        }
        if !plans.click_ministry(ministry_name).await? {
            return Err(HarnessError::assertion(format!(
                "ministry {ministry_name} not listed after adding"
            )));
        }

        let ministry = MinistryPage::new(page.clone());
        ministry.expect_ministry_displayed().await?;
        if !ministry.add_plan(plan_name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add plan not offered"));
        }
        if !ministry.click_first_plan().await? {
            return Err(HarnessError::assertion(format!("plan {plan_name} not listed after adding")));
        }

        let plan = PlanPage::new(page.clone());
        plan.expect_plan_displayed().await?;
        let tab = plan.open_service_order().await?;
        let before = plan.position_count().await?;
        let added = plan.add_position(position).await?;
        if added {
            expect_count(&page, &plan.position_rows, before + 1).await?;
        }
        info!(ministry = ministry_name, plan = plan_name, added, "plan built");
        Ok(FeatureOutcome::completed_if(tab, "order of service not shown")
            .and(FeatureOutcome::completed_if(added, "add position not offered")))
    })
    .await
}
