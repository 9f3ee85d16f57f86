use crate::helpers::generic::{expect_visible, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, icon, input, search};

/// One role: its members and permissions
#[derive(Debug, Clone)]
pub struct RolePage {
    page: Page,
    /// Role name heading
    pub heading: Locator,
    /// Member rows
    pub member_rows: Locator,
    /// Opens the add-member panel
    pub add_member_button: Locator,
    /// Person search in the add-member panel
    pub member_search_input: Locator,
    /// Search button in the add-member panel
    pub member_search_button: Locator,
    /// Remove a member
    pub remove_member_button: Locator,
}

impl RolePage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            member_rows: Locator::new("#roleMembersBox tbody tr"),
            add_member_button: button("Add Member"),
            member_search_input: input("personAddText"),
            member_search_button: button("Search"),
            remove_member_button: icon("person_remove"),
        }
    }

    /// Path of a role
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/settings/role/{id}")
    }

    /// Open a role by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Permission checkbox by label
    #[must_use]
    pub fn permission(&self, label: &str) -> Locator {
        Locator::role(AriaRole::Checkbox, label)
    }

    /// Fail unless the role page rendered
    pub async fn expect_role_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_visible(&self.page, &self.heading).await
    }

    /// Number of members listed
    pub async fn member_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.member_rows).await
    }

    /// Find a person and add them to the role
    pub async fn add_member(&self, name: &str) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.add_member_button).await?
            || !search(
                &self.page,
                &self.member_search_input,
                &self.member_search_button,
                name,
            )
            .await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &button("Select").first()).await
    }

    /// Remove the first member
    pub async fn remove_first_member(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.remove_member_button.clone().first()).await
    }

    /// Grant or revoke a permission
    pub async fn set_permission(&self, label: &str, granted: bool) -> HarnessResult<bool> {
        let checkbox = self.permission(label);
        if self.page.find(&checkbox).await.is_none() {
            return Ok(false);
        }
        self.page.set_checked(&checkbox, granted).await?;
        Ok(true)
    }
}

impl PageObject for RolePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/settings/role/:id")
    }

    fn page_name(&self) -> &'static str {
        "role"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
