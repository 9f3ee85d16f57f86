use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, icon, input, open_fill_save};

/// Church settings and the role list
#[derive(Debug, Clone)]
pub struct SettingsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the church settings editor
    pub edit_church_button: Locator,
    /// Opens the add-role editor
    pub add_role_button: Locator,
    /// Name in the role editor
    pub role_name_input: Locator,
    /// Roles table
    pub table: Locator,
    /// Role rows
    pub rows: Locator,
    /// Links to roles
    pub role_links: Locator,
    /// Shown when no custom roles exist
    pub empty_state: Locator,
}

impl SettingsPage {
    /// Settings path
    pub const PATH: &'static str = "/settings";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Settings"),
            edit_church_button: icon("edit_square"),
            add_role_button: button("Add Role"),
            role_name_input: input("roleName"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            role_links: Locator::new("a[href^='/settings/role/']"),
            empty_state: Locator::text("No roles found"),
        }
    }

    /// Open settings
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Open the first role
    pub async fn click_first_role(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.role_links.clone().first()).await
    }

    /// Open the role called `name`
    pub async fn click_role(&self, name: &str) -> HarnessResult<bool> {
        let link = self.role_links.clone().with_text(name).first();
        click_if_visible(&self.page, &link).await
    }

    /// Create a role
    pub async fn add_role(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_role_button, &self.role_name_input, name).await
    }

    /// Open the church settings editor
    pub async fn edit_church_settings(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.edit_church_button).await
    }

    /// Fail unless the roles table or the empty state shows up
    pub async fn expect_settings_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for SettingsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "settings"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for SettingsPage {
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
