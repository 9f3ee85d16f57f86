//! Donation scenarios: batches and funds.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::page_object::{ListScreen, PageObject};
use crate::pages::{DonationsPage, FundsPage};
use crate::result::HarnessResult;
use tracing::info;

/// The batch list renders its table or its empty state
pub async fn display_batches(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Donations, |ctx| async move {
        let donations = DonationsPage::new(ctx.page().clone());
        donations.expect_donations_displayed().await?;
        let state = donations.list_state().await?;
        info!(?state, "donation batches displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a batch and check it is listed
pub async fn add_batch(ctx: &TestContext, name: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Donations, |ctx| async move {
        let donations = DonationsPage::new(ctx.page().clone());
        let before = donations.row_count().await?;
        if !donations.add_batch(name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add batch not offered"));
        }
        expect_count(ctx.page(), &donations.rows, before + 1).await?;
        info!(name, "batch added");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Funds reached through the link on the batches screen
pub async fn display_funds(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Donations, |ctx| async move {
        DonationsPage::new(ctx.page().clone()).goto_funds().await?;
        let funds = FundsPage::new(ctx.page().clone());
        funds.expect_to_be_on_page().await?;
        funds.expect_funds_displayed().await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a fund and check it is listed exactly once, with a
/// "Non-Deductible" label when the toggle was left off
pub async fn create_fund(ctx: &TestContext, name: &str, tax_deductible: bool) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Funds, |ctx| async move {
        let page = ctx.page().clone();
        let funds = FundsPage::new(page.clone());
        let labels_before = page.count(&funds.non_deductible_label).await?;
        if !funds.add_fund(name, tax_deductible).await? {
            return Ok(FeatureOutcome::completed_if(false, "add fund not offered"));
        }
        expect_count(&page, &funds.fund_link(name), 1).await?;
        let expected_labels = labels_before + usize::from(!tax_deductible);
        expect_count(&page, &funds.non_deductible_label, expected_labels).await?;
        info!(name, tax_deductible, "fund created");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a fund, rename it, then delete it
pub async fn fund_crud(ctx: &TestContext, name: &str) -> HarnessResult<FeatureOutcome> {
    let created = create_fund(ctx, name, true).await?;
    if !created.is_completed() {
        return Ok(created);
    }

    run_feature(ctx, Feature::Funds, |ctx| async move {
        let page = ctx.page().clone();
        let funds = FundsPage::new(page.clone());
        let renamed = format!("{name} Renamed");
        let edited = funds.rename_fund(name, &renamed).await?;
        let current = if edited { renamed.as_str() } else { name };
        if edited {
            expect_count(&page, &funds.fund_link(&renamed), 1).await?;
        }

        if !funds.delete_fund(current).await? {
            return Ok(FeatureOutcome::completed_if(false, "delete fund not offered"));
        }
        expect_count(&page, &funds.fund_link(current), 0).await?;
        info!(name, edited, "fund added, edited and deleted");
        Ok(FeatureOutcome::completed_if(edited, "fund editor not shown"))
    })
    .await
}
