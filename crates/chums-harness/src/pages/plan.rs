use crate::helpers::generic::{expect_visible, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, input, open_fill_save};

/// One service plan: positions and the order of service
#[derive(Debug, Clone)]
pub struct PlanPage {
    page: Page,
    /// Plan name heading
    pub heading: Locator,
    /// Order-of-service tab
    pub service_order_tab: Locator,
    /// Position rows
    pub position_rows: Locator,
    /// Opens the add-position editor
    pub add_position_button: Locator,
    /// Name in the position editor
    pub position_name_input: Locator,
}

impl PlanPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            service_order_tab: Locator::role(AriaRole::Tab, "Order of Service"),
            position_rows: Locator::new("#positionsBox tbody tr"),
            add_position_button: button("Add Position"),
            position_name_input: input("positionName"),
        }
    }

    /// Path of a plan
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/plans/{id}")
    }

    /// Open a plan by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Fail unless the plan page rendered
    pub async fn expect_plan_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_visible(&self.page, &self.heading).await
    }

    /// Number of positions listed
    pub async fn position_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.position_rows).await
    }

    /// Add a position by name
    pub async fn add_position(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(
            &self.page,
            &self.add_position_button,
            &self.position_name_input,
            name,
        )
        .await
    }

    /// Switch to the order of service
    pub async fn open_service_order(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.service_order_tab).await
    }
}

impl PageObject for PlanPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/plans/:id")
    }

    fn page_name(&self) -> &'static str {
        "plan"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
