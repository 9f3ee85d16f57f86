use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{click_if_visible, nav_link};
use super::ReportPage;

/// Report catalogue
#[derive(Debug, Clone)]
pub struct ReportsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Report list
    pub report_list: Locator,
    /// Links to reports
    pub report_links: Locator,
    /// Shown when no reports are available
    pub empty_state: Locator,
}

impl ReportsPage {
    /// Reports path
    pub const PATH: &'static str = "/reports";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Reports"),
            report_list: Locator::test_id("report-list"),
            report_links: Locator::new("a[href^='/reports/']"),
            empty_state: Locator::text("No reports available"),
        }
    }

    /// Open the catalogue
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Open a report by key (`birthdays`, `attendanceTrend`, ...)
    pub async fn open_report(&self, key: &str) -> HarnessResult<bool> {
        click_if_visible(&self.page, &nav_link(&ReportPage::path_for(key))).await
    }

    /// Open a report by its title
    pub async fn open_report_named(&self, title: &str) -> HarnessResult<bool> {
        let link = self.report_links.clone().with_text(title).first();
        click_if_visible(&self.page, &link).await
    }

    /// Open the first report
    pub async fn click_first_report(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.report_links.clone().first()).await
    }

    /// Fail unless the catalogue or the empty state shows up
    pub async fn expect_reports_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for ReportsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "reports"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for ReportsPage {
    fn table(&self) -> &Locator {
        &self.report_list
    }

    fn rows(&self) -> &Locator {
        &self.report_links
    }

    fn empty_state(&self) -> &Locator {
        &self.empty_state
    }
}
