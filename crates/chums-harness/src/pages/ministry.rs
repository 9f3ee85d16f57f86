use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, input, open_fill_save};

/// One ministry and its service plans
#[derive(Debug, Clone)]
pub struct MinistryPage {
    page: Page,
    /// Ministry name heading
    pub heading: Locator,
    /// Opens the add-plan editor
    pub add_plan_button: Locator,
    /// Name in the plan editor
    pub plan_name_input: Locator,
    /// Plans table
    pub table: Locator,
    /// Plan rows
    pub rows: Locator,
    /// Links to plans
    pub plan_links: Locator,
    /// Shown when the ministry has no plans
    pub empty_state: Locator,
}

impl MinistryPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            add_plan_button: button("Add Plan"),
            plan_name_input: input("planName"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            plan_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No plans found"),
        }
    }

    /// Path of a ministry
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/plans/ministries/{id}")
    }

    /// Open a ministry by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Open the first plan
    pub async fn click_first_plan(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.plan_links.clone().first()).await
    }

    /// Create a plan
    pub async fn add_plan(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_plan_button, &self.plan_name_input, name).await
    }

    /// Fail unless the plans table or the empty state shows up
    pub async fn expect_ministry_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        self.expect_displayed().await
    }
}

impl PageObject for MinistryPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/plans/ministries/:id")
    }

    fn page_name(&self) -> &'static str {
        "ministry"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for MinistryPage {
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
