use crate::helpers::generic::{expect_count, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, fill_if_visible, icon, input};

/// One person's record with the household panel
#[derive(Debug, Clone)]
pub struct PersonPage {
    page: Page,
    /// Name heading
    pub name_heading: Locator,
    /// Opens the edit form
    pub edit_button: Locator,
    /// First name in the edit form
    pub first_name_input: Locator,
    /// Last name in the edit form
    pub last_name_input: Locator,
    /// Save edits
    pub save_button: Locator,
    /// Discard edits
    pub cancel_button: Locator,
    /// Delete the person
    pub delete_button: Locator,
    /// Household member rows
    pub household_members: Locator,
    /// Remove a household member
    pub remove_member_button: Locator,
}

impl PersonPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            name_heading: Locator::any_role(AriaRole::Heading),
            edit_button: icon("edit_square").or(Locator::test_id("edit-person-button")),
            first_name_input: input("first"),
            last_name_input: input("last"),
            save_button: button("Save"),
            cancel_button: button("Cancel"),
            delete_button: button("Delete"),
            household_members: Locator::new("#householdBox tr"),
            remove_member_button: icon("person_remove"),
        }
    }

    /// Path of a person
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/people/{id}")
    }

    /// Open a person by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Id in the current URL, if on a person page
    pub async fn person_id(&self) -> HarnessResult<Option<String>> {
        let url = self.page.url().await?;
        Ok(self.url_pattern().extract_params(&url).remove("id"))
    }

    /// Fail unless `name` is shown exactly once
    pub async fn expect_person_displayed(&self, name: &str) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_count(&self.page, &Locator::exact_text(name), 1).await
    }

    /// Open the edit form
    pub async fn edit_person(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.edit_button).await
    }

    /// Change the name and save
    pub async fn update_name(&self, first: &str, last: &str) -> HarnessResult<bool> {
        if !self.edit_person().await? {
            return Ok(false);
        }
        if !fill_if_visible(&self.page, &self.first_name_input, first).await?
            || !fill_if_visible(&self.page, &self.last_name_input, last).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Leave the edit form without saving
    pub async fn cancel_edit(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.cancel_button).await
    }

    /// Delete the person, accepting the confirm dialog
    pub async fn delete_person(&self) -> HarnessResult<bool> {
        if !self.edit_person().await? {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.delete_button).await
    }

    /// Number of household members listed
    pub async fn household_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.household_members).await
    }

    /// Remove the first removable household member
    pub async fn remove_household_member(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.remove_member_button.clone().first()).await
    }
}

impl PageObject for PersonPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/people/:id")
    }

    fn page_name(&self) -> &'static str {
        "person"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.name_heading)
    }
}
