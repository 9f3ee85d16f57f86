use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, input, open_fill_save};

/// Task automations
#[derive(Debug, Clone)]
pub struct AutomationsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-automation editor
    pub add_automation_button: Locator,
    /// Title in the automation editor
    pub title_input: Locator,
    /// Automations table
    pub table: Locator,
    /// Automation rows
    pub rows: Locator,
    /// Links to automations
    pub automation_links: Locator,
    /// Shown when there are no automations
    pub empty_state: Locator,
}

impl AutomationsPage {
    /// Automations path
    pub const PATH: &'static str = "/tasks/automations";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Automations"),
            add_automation_button: button("Add Automation"),
            title_input: input("title"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            automation_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No automations found"),
        }
    }

    /// Open automations
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Create an automation
    pub async fn add_automation(&self, title: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_automation_button, &self.title_input, title).await
    }

    /// Open the first automation
    pub async fn click_first_automation(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.automation_links.clone().first()).await
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_automations_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for AutomationsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "automations"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for AutomationsPage {
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
