//! Cross-cutting helpers shared by page objects and feature scenarios.
//!
//! - [`generic`]: wait and assertion primitives
//! - [`auth`]: login, church selection and navigation with login recovery

pub mod auth;
pub mod generic;

pub use auth::{is_login_url, login_and_select_church, navigate_directly, LOGIN_PATH};
pub use generic::{
    click_and_wait, expect_any_visible, expect_count, expect_hidden, expect_text, expect_url,
    expect_visible, fill_and_wait, goto_and_wait, wait_for_page_load,
};
