use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{
    button, click_if_visible, css, fill_if_visible, goto_via_link, input, nav_link, search,
    DashboardPage,
};

/// Group list
#[derive(Debug, Clone)]
pub struct GroupsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Search box
    pub search_input: Locator,
    /// Search button
    pub search_button: Locator,
    /// Opens the add-group form
    pub add_button: Locator,
    /// Category in the add form
    pub category_input: Locator,
    /// Name in the add form
    pub name_input: Locator,
    /// Groups table
    pub table: Locator,
    /// Group rows
    pub rows: Locator,
    /// Links to group pages
    pub group_links: Locator,
    /// Shown when there are no groups
    pub empty_state: Locator,
}

impl GroupsPage {
    /// Groups path
    pub const PATH: &'static str = "/groups";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Groups"),
            search_input: input("searchText"),
            search_button: button("Search"),
            add_button: Locator::new("#addBtnGroup").or(button("Add Group")),
            category_input: input("categoryName"),
            name_input: input("groupName"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            group_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No groups found"),
        }
    }

    /// Open the group list directly
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Open the dashboard and follow its Groups link, or navigate directly
    pub async fn goto_via_dashboard(&self) -> HarnessResult<()> {
        DashboardPage::new(self.page.clone()).goto().await?;
        goto_via_link(&self.page, &nav_link(Self::PATH), Self::PATH).await
    }

    /// Filter groups by name
    pub async fn search_groups(&self, term: &str) -> HarnessResult<bool> {
        search(&self.page, &self.search_input, &self.search_button, term).await
    }

    /// Open the first group
    pub async fn click_first_group(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.group_links.clone().first()).await
    }

    /// Open the group called `name`
    pub async fn click_group(&self, name: &str) -> HarnessResult<bool> {
        let link = self.group_links.clone().with_text(name).first();
        click_if_visible(&self.page, &link).await
    }

    /// Create a group in a category
    pub async fn add_group(&self, category: &str, name: &str) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.add_button).await? {
            return Ok(false);
        }
        if !fill_if_visible(&self.page, &self.category_input, category).await?
            || !fill_if_visible(&self.page, &self.name_input, name).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &button("Save")).await
    }

    /// Link to a group by name
    #[must_use]
    pub fn group_link(&self, name: &str) -> Locator {
        self.group_links.clone().with_text(name)
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_groups_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for GroupsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "groups"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for GroupsPage {
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
