//! People directory scenarios: search, open a person, add/edit/delete.

use super::{run_feature, Feature, FeatureOutcome, SearchMode};
use crate::context::TestContext;
use crate::helpers::generic::expect_url;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::pages::{DashboardPage, PeoplePage, PersonPage};
use crate::result::{HarnessError, HarnessResult};
use tracing::{info, warn};

/// Search for `term` from the screen `mode` names.
///
/// Completes when the search box was there; the number of hits is logged,
/// not asserted, since demo data varies between runs.
pub async fn search(ctx: &TestContext, term: &str, mode: SearchMode) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, mode.feature(), |ctx| async move {
        let page = ctx.page().clone();
        let (searched, hits) = match mode {
            SearchMode::People => {
                let people = PeoplePage::new(page.clone());
                let searched = people.search_people(term).await?;
                (searched, people.row_count().await?)
            }
            SearchMode::Dashboard => {
                let dashboard = DashboardPage::new(page.clone());
                let searched = dashboard.search_people(term).await?;
                (searched, dashboard.result_count().await?)
            }
        };
        if searched {
            info!(term, hits, ?mode, "searched people");
        }
        Ok(FeatureOutcome::completed_if(searched, "search box not shown"))
    })
    .await
}

/// Search from the People screen, retrying from the dashboard widget when
/// People is not accessible.
///
/// A dashboard fallback reports [`FeatureOutcome::Degraded`]; when neither
/// works the result is [`FeatureOutcome::NotAccessible`], logged but never
/// raised.
pub async fn search_with_fallback(ctx: &TestContext, term: &str) -> HarnessResult<FeatureOutcome> {
    let primary = SearchMode::People;
    let outcome = search(ctx, term, primary).await?;
    if !outcome.is_not_accessible() {
        return Ok(outcome);
    }

    let fallback = primary.fallback();
    match search(ctx, term, fallback).await? {
        FeatureOutcome::Completed => Ok(FeatureOutcome::Degraded {
            reason: format!("{} not accessible; searched from {}", primary.feature(), fallback.feature()),
        }),
        FeatureOutcome::NotAccessible { .. } => {
            warn!(term, "people search not accessible from any screen");
            Ok(outcome)
        }
        degraded => Ok(degraded),
    }
}

/// Run a search for each term in turn
pub async fn search_sweep(ctx: &TestContext, terms: &[&str]) -> HarnessResult<FeatureOutcome> {
    let mut outcome = FeatureOutcome::Completed;
    for term in terms {
        let step = search_with_fallback(ctx, term).await?;
        if step.is_not_accessible() {
            return Ok(step);
        }
        outcome = outcome.and(step);
    }
    Ok(outcome)
}

/// The People list renders its table or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::People, |ctx| async move {
        let people = PeoplePage::new(ctx.page().clone());
        people.expect_people_displayed().await?;
        let state = people.list_state().await?;
        info!(?state, "people list displayed");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Search for `name`, open their record and check the name is shown once
pub async fn open_person(ctx: &TestContext, name: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::People, |ctx| async move {
        let people = PeoplePage::new(ctx.page().clone());
        if !people.search_people(name).await? {
            return Ok(FeatureOutcome::completed_if(false, "search box not shown"));
        }
        if !people.click_person(name).await? {
            return Ok(FeatureOutcome::completed_if(false, "person not in results"));
        }
        let person = PersonPage::new(ctx.page().clone());
        person.expect_person_displayed(name).await?;
        let id = person.person_id().await?;
        info!(name, ?id, "opened person");
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Add a person, rename them, then delete them again
pub async fn crud(ctx: &TestContext, first: &str, last: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::People, |ctx| async move {
        let page = ctx.page().clone();
        let people = PeoplePage::new(page.clone());
        let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
        if !people.add_person(first, last, &email).await? {
            return Ok(FeatureOutcome::completed_if(false, "add person form not shown"));
        }

        let full = format!("{first} {last}");
        people.goto().await?;
        people.search_people(&full).await?;
        if !people.click_person(&full).await? {
            return Err(HarnessError::assertion(format!("{full} not found after adding")));
        }
        let person = PersonPage::new(page.clone());
        person.expect_person_displayed(&full).await?;

        let renamed_last = format!("{last}son");
        let renamed = format!("{first} {renamed_last}");
        let edited = person.update_name(first, &renamed_last).await?;
        if edited {
            person.expect_person_displayed(&renamed).await?;
        }

        if !person.delete_person().await? {
            return Ok(FeatureOutcome::completed_if(false, "delete not offered"));
        }
        expect_url(&page, &UrlPattern::exact(PeoplePage::PATH)).await?;
        info!(name = %full, edited, "person added, edited and deleted");
        Ok(FeatureOutcome::completed_if(edited, "edit form not shown"))
    })
    .await
}

/// People list reached from the dashboard link
pub async fn via_dashboard(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Dashboard, |ctx| async move {
        let people = PeoplePage::new(ctx.page().clone());
        people.goto_via_dashboard().await?;
        people.expect_to_be_on_page().await?;
        people.expect_people_displayed().await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}
