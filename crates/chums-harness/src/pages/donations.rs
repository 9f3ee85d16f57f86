use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, goto_via_link, input, nav_link, open_fill_save};
use super::FundsPage;

/// Donation batches
#[derive(Debug, Clone)]
pub struct DonationsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-batch form
    pub add_batch_button: Locator,
    /// Batch name in the add form
    pub batch_name_input: Locator,
    /// Link to the funds screen
    pub funds_link: Locator,
    /// Batches table
    pub table: Locator,
    /// Batch rows
    pub rows: Locator,
    /// Links to batches
    pub batch_links: Locator,
    /// Shown when there are no batches
    pub empty_state: Locator,
}

impl DonationsPage {
    /// Donations path
    pub const PATH: &'static str = "/donations";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Donations"),
            add_batch_button: button("Add Batch"),
            batch_name_input: input("name"),
            funds_link: nav_link(FundsPage::PATH),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            batch_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No batches found"),
        }
    }

    /// Open the batches screen
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Create a batch
    pub async fn add_batch(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_batch_button, &self.batch_name_input, name).await
    }

    /// Open the first batch
    pub async fn click_first_batch(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.batch_links.clone().first()).await
    }

    /// Follow the Funds link, or navigate directly
    pub async fn goto_funds(&self) -> HarnessResult<()> {
        goto_via_link(&self.page, &self.funds_link, FundsPage::PATH).await
    }

    /// Fail unless the batches table or the empty state shows up
    pub async fn expect_donations_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for DonationsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "donations"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for DonationsPage {
    fn table(&self) -> &Locator {
        &self.table
    }

    fn rows(&self) -> &Locator {
        &self.rows
    }

    fn empty_state(&self) -> &Locator {
        &self.empty_state
    }
}
