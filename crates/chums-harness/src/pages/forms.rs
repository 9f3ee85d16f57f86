use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, input, open_fill_save};

/// Forms list
#[derive(Debug, Clone)]
pub struct FormsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-form editor
    pub add_form_button: Locator,
    /// Name in the add editor
    pub name_input: Locator,
    /// Archived forms tab
    pub archived_tab: Locator,
    /// Forms table
    pub table: Locator,
    /// Form rows
    pub rows: Locator,
    /// Links to form pages
    pub form_links: Locator,
    /// Shown when there are no forms
    pub empty_state: Locator,
}

impl FormsPage {
    /// Forms path
    pub const PATH: &'static str = "/forms";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Forms"),
            add_form_button: button("Add Form").or(Locator::new("#addBtnGroup")),
            name_input: input("formName"),
            archived_tab: Locator::role(AriaRole::Tab, "Archived"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            form_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No forms found"),
        }
    }

    /// Open the forms list
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Create a form
    pub async fn add_form(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_form_button, &self.name_input, name).await
    }

    /// Open the first form
    pub async fn click_first_form(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.form_links.clone().first()).await
    }

    /// Open the form called `name`
    pub async fn click_form(&self, name: &str) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.form_link(name).first()).await
    }

    /// Link to a form by name
    #[must_use]
    pub fn form_link(&self, name: &str) -> Locator {
        self.form_links.clone().with_text(name)
    }

    /// Switch to archived forms
    pub async fn open_archived(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.archived_tab).await
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_forms_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for FormsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "forms"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for FormsPage {
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
