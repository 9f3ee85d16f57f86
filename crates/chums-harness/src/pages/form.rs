use crate::helpers::generic::{expect_visible, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, fill_if_visible, icon, input, open_fill_save};

/// One form: its questions and settings
#[derive(Debug, Clone)]
pub struct FormDetailsPage {
    page: Page,
    /// Form name heading
    pub heading: Locator,
    /// Questions tab
    pub questions_tab: Locator,
    /// Question rows
    pub question_rows: Locator,
    /// Opens the add-question editor
    pub add_question_button: Locator,
    /// Title in the question editor
    pub question_title_input: Locator,
    /// Opens the form settings editor
    pub edit_button: Locator,
    /// Name in the settings editor
    pub name_input: Locator,
    /// Save
    pub save_button: Locator,
    /// Delete the form
    pub delete_button: Locator,
}

impl FormDetailsPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::any_role(AriaRole::Heading),
            questions_tab: Locator::role(AriaRole::Tab, "Questions"),
            question_rows: Locator::new("#questionsBox tbody tr"),
            add_question_button: button("Add Question"),
            question_title_input: input("title"),
            edit_button: icon("edit_square"),
            name_input: input("formName"),
            save_button: button("Save"),
            delete_button: button("Delete"),
        }
    }

    /// Path of a form
    #[must_use]
    pub fn path_for(id: &str) -> String {
        format!("/forms/{id}")
    }

    /// Open a form by id
    pub async fn goto(&self, id: &str) -> HarnessResult<()> {
        goto_and_wait(&self.page, &Self::path_for(id)).await
    }

    /// Fail unless the form page rendered
    pub async fn expect_form_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_visible(&self.page, &self.heading).await
    }

    /// Switch to the questions tab
    pub async fn open_questions(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.questions_tab).await
    }

    /// Add a question by title
    pub async fn add_question(&self, title: &str) -> HarnessResult<bool> {
        open_fill_save(
            &self.page,
            &self.add_question_button,
            &self.question_title_input,
            title,
        )
        .await
    }

    /// Number of questions listed
    pub async fn question_count(&self) -> HarnessResult<usize> {
        self.page.count(&self.question_rows).await
    }

    /// Rename the form
    pub async fn edit_form_name(&self, name: &str) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.edit_button).await?
            || !fill_if_visible(&self.page, &self.name_input, name).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Delete the form, accepting the confirm dialog
    pub async fn delete_form(&self) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.edit_button).await? {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.delete_button).await
    }
}

impl PageObject for FormDetailsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::route("/forms/:id")
    }

    fn page_name(&self) -> &'static str {
        "form details"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
