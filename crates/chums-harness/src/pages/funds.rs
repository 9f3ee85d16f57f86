use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, fill_if_visible, input};

/// Funds list with the inline fund editor
#[derive(Debug, Clone)]
pub struct FundsPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-fund form
    pub add_fund_button: Locator,
    /// Fund name in the editor
    pub name_input: Locator,
    /// Tax-deductible toggle in the editor
    pub tax_deductible_checkbox: Locator,
    /// Save the editor
    pub save_button: Locator,
    /// Delete from the editor
    pub delete_button: Locator,
    /// Funds table
    pub table: Locator,
    /// Fund rows
    pub rows: Locator,
    /// Label shown on funds that are not tax deductible
    pub non_deductible_label: Locator,
    /// Shown when there are no funds
    pub empty_state: Locator,
}

impl FundsPage {
    /// Funds path
    pub const PATH: &'static str = "/donations/funds";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Funds"),
            add_fund_button: button("Add Fund").or(Locator::new("#addBtnGroup")),
            name_input: input("fundName"),
            tax_deductible_checkbox: input("taxDeductible"),
            save_button: button("Save"),
            delete_button: button("Delete"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            non_deductible_label: Locator::exact_text("Non-Deductible"),
            empty_state: Locator::text("No funds found"),
        }
    }

    /// Open the funds screen
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Link to a fund by name
    #[must_use]
    pub fn fund_link(&self, name: &str) -> Locator {
        Locator::new("a").with_text(name)
    }

    /// Edit icon in the row of a fund, labelled `Edit <name>`
    #[must_use]
    pub fn edit_fund_button(&self, name: &str) -> Locator {
        Locator::role(AriaRole::Button, &format!("Edit {name}"))
    }

    /// Create a fund
    pub async fn add_fund(&self, name: &str, tax_deductible: bool) -> HarnessResult<bool> {
        if !click_if_visible(&self.page, &self.add_fund_button).await?
            || !fill_if_visible(&self.page, &self.name_input, name).await?
        {
            return Ok(false);
        }
        if self.page.find(&self.tax_deductible_checkbox).await.is_some() {
            self.page
                .set_checked(&self.tax_deductible_checkbox, tax_deductible)
                .await?;
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Open the editor of the fund called `name`
    pub async fn open_fund_editor(&self, name: &str) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.edit_fund_button(name)).await
    }

    /// Rename a fund
    pub async fn rename_fund(&self, name: &str, new_name: &str) -> HarnessResult<bool> {
        if !self.open_fund_editor(name).await?
            || !fill_if_visible(&self.page, &self.name_input, new_name).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Delete a fund, accepting the confirm dialog
    pub async fn delete_fund(&self, name: &str) -> HarnessResult<bool> {
        if !self.open_fund_editor(name).await? {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.delete_button).await
    }

    /// Number of links showing `name`
    pub async fn fund_link_count(&self, name: &str) -> HarnessResult<usize> {
        self.page.count(&self.fund_link(name)).await
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_funds_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for FundsPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "funds"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for FundsPage {
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
