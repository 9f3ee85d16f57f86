//! Dashboard scenarios.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::{expect_count, expect_url, expect_visible};
use crate::locator::Locator;
use crate::page_object::{PageObject, UrlPattern};
use crate::pages::DashboardPage;
use crate::result::HarnessResult;
use tracing::info;

/// Person page URLs as the dashboard links them
pub const PERSON_URL: &str = r"^/people/PER\d+$";

/// The dashboard renders after sign-in
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Dashboard, |ctx| async move {
        let dashboard = DashboardPage::new(ctx.page().clone());
        dashboard.expect_to_be_on_page().await?;
        expect_visible(ctx.page(), &dashboard.heading).await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Search `name` in the dashboard widget, open the matching result and
/// check the person page shows the name exactly once.
///
/// Every step is asserted: this is the canonical end-to-end search path.
pub async fn search_and_open_person(ctx: &TestContext, name: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Dashboard, |ctx| async move {
        let page = ctx.page().clone();
        let dashboard = DashboardPage::new(page.clone());
        expect_visible(&page, &dashboard.search_input).await?;
        dashboard.search_people(name).await?;

        let result = dashboard.result(name).first();
        expect_visible(&page, &result).await?;
        dashboard.click_result(name).await?;

        expect_url(&page, &UrlPattern::regex(PERSON_URL)).await?;
        expect_count(&page, &Locator::exact_text(name), 1).await?;
        let url = page.url().await?;
        info!(name, %url, "opened person from dashboard search");
        Ok(FeatureOutcome::Completed)
    })
    .await
}
