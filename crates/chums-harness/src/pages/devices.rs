use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, css, input, open_fill_save};

/// Devices paired to the user's account
#[derive(Debug, Clone)]
pub struct DevicesPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the pairing form
    pub pair_button: Locator,
    /// Pairing code
    pub code_input: Locator,
    /// Devices table
    pub table: Locator,
    /// Device rows
    pub rows: Locator,
    /// Shown when nothing is paired
    pub empty_state: Locator,
}

impl DevicesPage {
    /// Devices path
    pub const PATH: &'static str = "/profile/devices";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Devices"),
            pair_button: button("Pair"),
            code_input: input("pairingCode"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            empty_state: Locator::text("No devices"),
        }
    }

    /// Open devices
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Pair a device by its code
    pub async fn pair_device(&self, code: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.pair_button, &self.code_input, code).await
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_devices_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for DevicesPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "devices"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for DevicesPage {
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
