use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css};

/// A single report with its filter form and results
#[derive(Debug, Clone)]
pub struct ReportPage {
    page: Page,
    /// Report title heading
    pub heading: Locator,
    /// Runs the report
    pub run_button: Locator,
    /// Results table
    pub table: Locator,
    /// Result rows
    pub rows: Locator,
    /// Shown when the report returns nothing
    pub empty_state: Locator,
}

impl ReportPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            run_button: button("Run Report"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            empty_state: Locator::text("No data"),
        }
    }

    /// Path of a report
    #[must_use]
    pub fn path_for(key: &str) -> String {
        format!("/reports/{key}")
    }

    /// Open a report by key
    pub async fn goto(&self, key: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(key)).await
    }

    /// Key in the current URL, if on a report page
    pub async fn report_key(&self) -> HarnessResult<Option<String>> {
        let url = self.page.url().await?;
        Ok(self.url_pattern().extract_params(&url).remove("key"))
    }

    /// Run the report with its default filter
    pub async fn run_report(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.run_button).await
    }

    /// Fail unless results or the no-data message shows up
    pub async fn expect_report_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        self.expect_displayed().await
    }
}

impl PageObject for ReportPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/reports/:key")
    }

    fn page_name(&self) -> &'static str {
        "report"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for ReportPage {
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
