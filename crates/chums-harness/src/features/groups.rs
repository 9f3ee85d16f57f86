//! Group scenarios: list, search, open, create/rename/delete, membership.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::{expect_count, expect_url};
use crate::page_object::{ListScreen, UrlPattern};
use crate::pages::{GroupDetailsPage, GroupsPage};
use crate::result::{HarnessError, HarnessResult};
use tracing::info;

/// The group list renders its table or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Groups, |ctx| async move {
        let groups = GroupsPage::new(ctx.page().clone());
        groups.expect_groups_displayed().await?;
        let state = groups.list_state().await?;
        info!(?state, "groups displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Filter the list by `term`
pub async fn search(ctx: &TestContext, term: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Groups, |ctx| async move {
        let groups = GroupsPage::new(ctx.page().clone());
        let searched = groups.search_groups(term).await?;
        if searched {
            groups.expect_groups_displayed().await?;
            let hits = groups.row_count().await?;
            info!(term, hits, "searched groups");
        }
        Ok(FeatureOutcome::completed_if(searched, "group search not shown"))
    })
    .await
}

/// Open the first listed group
pub async fn open_first(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Groups, |ctx| async move {
        let groups = GroupsPage::new(ctx.page().clone());
        if !groups.click_first_group().await? {
            return Ok(FeatureOutcome::completed_if(false, "no groups listed"));
        }
        GroupDetailsPage::new(ctx.page().clone())
            .expect_group_displayed()
            .await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a group, rename it, then delete it
pub async fn crud(ctx: &TestContext, category: &str, name: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Groups, |ctx| async move {
        let page = ctx.page().clone();
        let groups = GroupsPage::new(page.clone());
        if !groups.add_group(category, name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add group form not shown"));
        }
        expect_count(&page, &groups.group_link(name), 1).await?;
        if !groups.click_group(name).await? {
            return Err(HarnessError::assertion(format!("group {name} not listed after adding")));
        }

        let group = GroupDetailsPage::new(page.clone());
        group.expect_group_displayed().await?;
        let renamed = format!("{name} (renamed)");
        let edited = group.edit_group_name(&renamed).await?;

        if !group.delete_group().await? {
            return Ok(FeatureOutcome::completed_if(false, "delete not offered"));
        }
        expect_url(&page, &UrlPattern::exact(GroupsPage::PATH)).await?;
        expect_count(&page, &groups.group_link(&renamed), 0).await?;
        info!(name, edited, "group added, edited and deleted");
        Ok(FeatureOutcome::completed_if(edited, "group settings not editable"))
    })
    .await
}

/// Add `person` to the group called `group` and remove a member again
pub async fn members(ctx: &TestContext, group: &str, person: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Groups, |ctx| async move {
        let page = ctx.page().clone();
        let groups = GroupsPage::new(page.clone());
        if !groups.click_group(group).await? {
            return Ok(FeatureOutcome::completed_if(false, "group not listed"));
        }

        let details = GroupDetailsPage::new(page.clone());
        details.expect_group_displayed().await?;
        details.open_members_tab().await?;
        let before = details.member_count().await?;
        if !details.add_member(person).await? {
            return Ok(FeatureOutcome::completed_if(false, "member search not shown"));
        }
        expect_count(&page, &details.member_rows, before + 1).await?;

        if !details.remove_first_member().await? {
            return Ok(FeatureOutcome::completed_if(false, "remove member not offered"));
        }
        expect_count(&page, &details.member_rows, before).await?;
        info!(group, person, "group member added and removed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}
