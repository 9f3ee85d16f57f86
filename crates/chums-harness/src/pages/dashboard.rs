use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, input, search};

/// Landing screen after sign-in, with the embedded people search widget
#[derive(Debug, Clone)]
pub struct DashboardPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// People search box
    pub search_input: Locator,
    /// People search button
    pub search_button: Locator,
    /// Person links in the search results
    pub results: Locator,
}

impl DashboardPage {
    /// Dashboard path
    pub const PATH: &'static str = "/";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Dashboard"),
            search_input: input("searchText").or(Locator::new("#searchText")),
            search_button: button("Search"),
            results: Locator::new(css::PERSON_LINK),
        }
    }

    /// Open the dashboard
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Search people from the dashboard widget
    pub async fn search_people(&self, term: &str) -> HarnessResult<bool> {
        search(&self.page, &self.search_input, &self.search_button, term).await
    }

    /// Result link for a person
    #[must_use]
    pub fn result(&self, name: &str) -> Locator {
        self.results.clone().with_text(name)
    }

    /// Open the search result for `name`
    pub async fn click_result(&self, name: &str) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.result(name).first()).await
    }

    /// Number of person links in the results
    pub async fn result_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.results).await
    }
}

impl PageObject for DashboardPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "dashboard"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
