use crate::helpers::generic::{expect_visible, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, fill_if_visible, icon, input, search};

/// One group: members, sessions and settings
#[derive(Debug, Clone)]
pub struct GroupDetailsPage {
    page: Page,
    /// Group name heading
    pub heading: Locator,
    /// Members tab
    pub members_tab: Locator,
    /// Sessions tab
    pub sessions_tab: Locator,
    /// Member rows
    pub member_rows: Locator,
    /// Person search inside the add-member panel
    pub member_search_input: Locator,
    /// Search button of the add-member panel
    pub member_search_button: Locator,
    /// Remove a member
    pub remove_member_button: Locator,
    /// Opens the group settings form
    pub edit_button: Locator,
    /// Name in the settings form
    pub name_input: Locator,
    /// Save settings
    pub save_button: Locator,
    /// Delete the group
    pub delete_button: Locator,
}

impl GroupDetailsPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            members_tab: Locator::role(AriaRole::Tab, "Members"),
            sessions_tab: Locator::role(AriaRole::Tab, "Sessions"),
            member_rows: Locator::new("#groupMembersBox tbody tr"),
            member_search_input: input("personAddText"),
            member_search_button: button("Search"),
            remove_member_button: icon("person_remove"),
            edit_button: icon("edit_square"),
            name_input: input("name"),
            save_button: button("Save"),
            delete_button: button("Delete"),
        }
    }

    /// Path of a group
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/groups/{id}")
    }

    /// Open a group by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Fail unless the group page rendered
    pub async fn expect_group_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_visible(&self.page, &self.heading).await
    }

    /// Switch to the members tab
    pub async fn open_members_tab(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.members_tab).await
    }

    /// Switch to the sessions tab
    pub async fn open_sessions_tab(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.sessions_tab).await
    }

    /// Number of members listed
    pub async fn member_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.member_rows).await
    }

    /// Find a person and add them to the group
    pub async fn add_member(&self, name: &str) -> HarnessResult<bool> {
        if !search(
            &self.page,
            &self.member_search_input,
            &self.member_search_button,
            name,
        )
        .await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &button("Add").first()).await
    }

    /// Remove the first member
    pub async fn remove_first_member(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.remove_member_button.clone().first()).await
    }

    /// Rename the group
    pub async fn edit_group_name(&self, name: &str) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.edit_button).await?
            || !fill_if_visible(&self.page, &self.name_input, name).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Delete the group, accepting the confirm dialog
    pub async fn delete_group(&self) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.edit_button).await? {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.delete_button).await
    }
}

impl PageObject for GroupDetailsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/groups/:id")
    }

    fn page_name(&self) -> &'static str {
        "group details"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
