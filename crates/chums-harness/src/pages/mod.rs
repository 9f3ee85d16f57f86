//! Page objects, one per admin screen.
//!
//! Action methods share one policy: look for the control first and return
//! `Ok(false)` straight away when it is not there (optional or
//! permission-gated UI), otherwise act, let the page settle and return
//! `Ok(true)`. Only the `expect_*` methods fail a scenario.

mod attendance;
mod automations;
mod dashboard;
mod devices;
mod donations;
mod form;
mod forms;
mod funds;
mod group;
mod groups;
mod login;
mod ministry;
mod people;
mod person;
mod plan;
mod plans;
mod profile;
mod report;
mod reports;
mod role;
mod settings;
mod tasks;

pub use attendance::AttendancePage;
pub use automations::AutomationsPage;
pub use dashboard::DashboardPage;
pub use devices::DevicesPage;
pub use donations::DonationsPage;
pub use form::FormDetailsPage;
pub use forms::FormsPage;
pub use funds::FundsPage;
pub use group::GroupDetailsPage;
pub use groups::GroupsPage;
pub use login::LoginPage;
pub use ministry::MinistryPage;
pub use people::PeoplePage;
pub use person::PersonPage;
pub use plan::PlanPage;
pub use plans::PlansPage;
pub use profile::ProfilePage;
pub use report::ReportPage;
pub use reports::ReportsPage;
pub use role::RolePage;
pub use settings::SettingsPage;
pub use tasks::TasksPage;

use crate::helpers::generic::{click_and_wait, fill_and_wait, goto_and_wait, wait_for_page_load};
use crate::locator::Locator;
use crate::page::Page;
use crate::result::HarnessResult;
use tracing::debug;

/// CSS shared by every table-based screen
pub mod css {
    /// The data table
    pub const TABLE: &str = "table";
    /// Body rows of the data table
    pub const ROWS: &str = "table tbody tr";
    /// Links inside body rows
    pub const ROW_LINKS: &str = "table tbody tr a";
    /// Links to person pages
    pub const PERSON_LINK: &str = "a[href^='/people/PER']";
}

/// Link to an in-app path
#[must_use]
pub fn nav_link(path: &str) -> Locator {
    Locator::new(format!("a[href='{path}']"))
}

/// `<button>` by label
#[must_use]
pub fn button(label: &str) -> Locator {
    Locator::new("button").with_text(label)
}

/// Material icon button by glyph name (`edit_square`, `person_remove`)
#[must_use]
pub fn icon(glyph: &str) -> Locator {
    Locator::new("button").with_text(glyph)
}

/// `<input name>`
#[must_use]
pub fn input(name: &str) -> Locator {
    Locator::new(format!("input[name='{name}']"))
}

pub(crate) async fn click_if_visible(page: &Page, locator: &Locator) -> HarnessResult<bool> {
    let Some(target) = page.find(locator).await else {
        return Ok(false);
    };
    click_and_wait(page, &target).await?;
    wait_for_page_load(page).await?;
    Ok(true)
}

pub(crate) async fn fill_if_visible(
    page: &Page,
    locator: &Locator,
    value: &str,
) -> HarnessResult<bool> {
    let Some(target) = page.find(locator).await else {
        return Ok(false);
    };
    fill_and_wait(page, &target, value).await?;
    Ok(true)
}

/// Type a term and submit it with the search button, or Enter when the
/// screen has no button
pub(crate) async fn search(
    page: &Page,
    input: &Locator,
    submit: &Locator,
    term: &str,
) -> HarnessResult<bool> {
    if !fill_if_visible(page, input, term).await? {
        return Ok(false);
    }
    if !click_if_visible(page, submit).await? {
        page.press(input, "Enter").await?;
        wait_for_page_load(page).await?;
    }
    Ok(true)
}

/// Fill a one-field form (`name`) that `open` reveals and save it
pub(crate) async fn open_fill_save(
    page: &Page,
    open: &Locator,
    field: &Locator,
    value: &str,
) -> HarnessResult<bool> {
    if !click_if_visible(page, open).await? {
        return Ok(false);
    }
    if page.find_within(field, page.config().timeouts.element()).await.is_none() {
        debug!(field = %field, "form field did not appear");
        return Ok(false);
    }
    fill_and_wait(page, field, value).await?;
    click_if_visible(page, &button("Save")).await
}

/// Click an in-app link, falling back to direct navigation when the link is
/// not on screen
pub(crate) async fn goto_via_link(page: &Page, link: &Locator, path: &str) -> HarnessResult<()> {
    if click_if_visible(page, link).await? {
        return Ok(());
    }
    debug!(path, link = %link, "link not found; navigating directly");
    goto_and_wait(page, path).await
}
