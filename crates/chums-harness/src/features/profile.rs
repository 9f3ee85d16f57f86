//! Profile scenarios: account details and paired devices.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::page_object::{ListScreen, PageObject};
use crate::pages::{DevicesPage, ProfilePage};
use crate::result::HarnessResult;
use tracing::{info, warn};

/// The profile form shows the signed-in account
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Profile, |ctx| async move {
        let profile = ProfilePage::new(ctx.page().clone());
        profile.expect_profile_displayed().await?;
        let email = profile.email().await?;
        let expected = &ctx.config().credentials.email;
        if email.as_deref() != Some(expected.as_str()) {
            warn!(?email, %expected, "profile shows a different account");
            return Ok(FeatureOutcome::completed_if(false, "profile email differs from the login"));
        }
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Change the account's name and save
pub async fn update_name(ctx: &TestContext, first: &str, last: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Profile, |ctx| async move {
        let profile = ProfilePage::new(ctx.page().clone());
        let saved = profile.update_name(first, last).await?;
        if saved {
            profile.expect_profile_displayed().await?;
            info!(first, last, "profile name saved");
        }
        Ok(FeatureOutcome::completed_if(saved, "profile form not editable"))
    })
    .await
}

/// Devices reached from the profile link
pub async fn display_devices(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Profile, |ctx| async move {
        ProfilePage::new(ctx.page().clone()).goto_devices().await?;
        let devices = DevicesPage::new(ctx.page().clone());
        devices.expect_to_be_on_page().await?;
        devices.expect_devices_displayed().await?;
        let state = devices.list_state().await?;
        info!(?state, "devices displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Pair a device by code and check it is listed
pub async fn pair_device(ctx: &TestContext, code: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Devices, |ctx| async move {
        let devices = DevicesPage::new(ctx.page().clone());
        let before = devices.row_count().await?;
        if !devices.pair_device(code).await? {
            return Ok(FeatureOutcome::completed_if(false, "pairing not offered"));
        }
        expect_count(ctx.page(), &devices.rows, before + 1).await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}
