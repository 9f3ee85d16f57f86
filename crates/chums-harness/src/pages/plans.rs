use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, input, open_fill_save};

/// Serving: the list of ministries
#[derive(Debug, Clone)]
pub struct PlansPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-ministry editor
    pub add_ministry_button: Locator,
    /// Name in the ministry editor
    pub name_input: Locator,
    /// Ministry list
    pub ministry_list: Locator,
    /// Links to ministries
    pub ministry_links: Locator,
    /// Shown when there are no ministries
    pub empty_state: Locator,
}

impl PlansPage {
    /// Plans path
    pub const PATH: &'static str = "/plans";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Plans"),
            add_ministry_button: button("Add Ministry"),
            name_input: input("ministryName"),
            ministry_list: Locator::test_id("ministry-list"),
            ministry_links: Locator::new("a[href^='/plans/ministries/']"),
            empty_state: Locator::text("No ministries found"),
        }
    }

    /// Open the ministry list
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Open the first ministry
    pub async fn click_first_ministry(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.ministry_links.clone().first()).await
    }

    /// Open the ministry called `name`
    pub async fn click_ministry(&self, name: &str) -> HarnessResult<bool> {
        let link = self.ministry_links.clone().with_text(name).first();
        click_if_visible(&self.page, &link).await
    }

    /// Create a ministry
    pub async fn add_ministry(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_ministry_button, &self.name_input, name).await
    }

    /// Fail unless the ministry list or the empty state shows up
    pub async fn expect_plans_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for PlansPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "plans"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for PlansPage {
    fn table(&self) -> &Locator {
        &self.ministry_list
    }

    fn rows(&self) -> &Locator {
        &self.ministry_links
    }

    fn empty_state(&self) -> &Locator {
        &self.empty_state
    }
}
