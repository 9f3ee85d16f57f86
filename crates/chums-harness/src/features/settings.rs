//! Settings scenarios: church settings and roles.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::expect_count;
use crate::pages::{RolePage, SettingsPage};
use crate::result::{HarnessError, HarnessResult};
use tracing::info;

/// The settings screen renders its role table or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Settings, |ctx| async move {
        let settings = SettingsPage::new(ctx.page().clone());
        settings.expect_settings_displayed().await?;
        let editable = settings.edit_church_settings().await?;
        Ok(FeatureOutcome::completed_if(editable, "church settings not editable"))
    })
    .await
}

/// Open the first listed role
pub async fn open_first_role(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Settings, |ctx| async move {
        let settings = SettingsPage::new(ctx.page().clone());
        if !settings.click_first_role().await? {
            return Ok(FeatureOutcome::completed_if(false, "no roles listed"));
        }
        RolePage::new(ctx.page().clone()).expect_role_displayed().await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a role, add `person` to it, grant `permission`, then remove the
/// member again
pub async fn role_members(
    ctx: &TestContext,
    role_name: &str,
    person: &str,
    permission: &str,
) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Settings, |ctx| async move {
        let page = ctx.page().clone();
        let settings = SettingsPage::new(page.clone());
        if !settings.add_role(role_name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add role not offered"));
        }
        if !settings.click_role(role_name).await? {
            return Err(HarnessError::assertion(format!("role {role_name} not listed after adding")));
        }

        let role = RolePage::new(page.clone());
        role.expect_role_displayed().await?;
        let before = role.member_count().await?;
        if !role.add_member(person).await? {
            return Ok(FeatureOutcome::completed_if(false, "add member not offered"));
        }
        expect_count(&page, &role.member_rows, before + 1).await?;

        let granted = role.set_permission(permission, true).await?;
        if role.remove_first_member().await? {
            expect_count(&page, &role.member_rows, before).await?;
        }
        info!(role = role_name, person, granted, "role updated");
        Ok(FeatureOutcome::completed_if(granted, "permission not offered"))
    })
    .await
}
