use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, fill_if_visible, goto_via_link, input, nav_link, search};
use super::DashboardPage;

/// People list with search and the add-person form
#[derive(Debug, Clone)]
pub struct PeoplePage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Simple search box
    pub search_input: Locator,
    /// Search button
    pub search_button: Locator,
    /// Opens the add-person form
    pub add_button: Locator,
    /// First name in the add form
    pub first_name_input: Locator,
    /// Last name in the add form
    pub last_name_input: Locator,
    /// Email in the add form
    pub email_input: Locator,
    /// Results table
    pub table: Locator,
    /// Result rows
    pub rows: Locator,
    /// Links to person pages
    pub person_links: Locator,
    /// Shown when nobody matches
    pub empty_state: Locator,
}

impl PeoplePage {
    /// People path
    pub const PATH: &'static str = "/people";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "People"),
            search_input: input("searchText").or(Locator::new("#searchText")),
            search_button: button("Search"),
            add_button: Locator::new("#addBtnGroup").or(button("Add Person")),
            first_name_input: input("first"),
            last_name_input: input("last"),
            email_input: input("email"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            person_links: Locator::new(css::PERSON_LINK),
            empty_state: Locator::text("No people found"),
        }
    }

    /// Open the people list directly
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Open the dashboard and follow its People link, or navigate directly
    pub async fn goto_via_dashboard(&self) -> HarnessResult<()> {
        DashboardPage::new(self.page.clone()).goto().await?;
        goto_via_link(&self.page, &nav_link(Self::PATH), Self::PATH).await
    }

    /// Search by name
    pub async fn search_people(&self, term: &str) -> HarnessResult<bool> {
        search(&self.page, &self.search_input, &self.search_button, term).await
    }

    /// Open the first person in the results
    pub async fn click_first_person(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.person_links.clone().first()).await
    }

    /// Open the person called `name`
    pub async fn click_person(&self, name: &str) -> HarnessResult<bool> {
        let link = self.person_links.clone().with_text(name).first();
        click_if_visible(&self.page, &link).await
    }

    /// Add a person through the inline form
    pub async fn add_person(&self, first: &str, last: &str, email: &str) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.add_button).await? {
            return Ok(false);
        }
        if !fill_if_visible(&self.page, &self.first_name_input, first).await?
            || !fill_if_visible(&self.page, &self.last_name_input, last).await?
        {
            return Ok(false);
        }
        fill_if_visible(&self.page, &self.email_input, email).await?;
        click_if_visible(&self.page, &button("Save")).await
    }

    /// Fail unless the results table or the empty state shows up
    pub async fn expect_people_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for PeoplePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "people"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for PeoplePage {
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
