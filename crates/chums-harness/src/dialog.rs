//! Native dialog handling.
//!
//! Destructive actions in the admin app ask `confirm("Are you sure...")`
//! before calling the API. Drivers answer every dialog according to an
//! [`AutoDialogBehavior`] and keep a record for later assertions.

use serde::{Deserialize, Serialize};

/// Type of browser dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogType {
    /// Alert dialog (OK button only)
    Alert,
    /// Confirm dialog (OK/Cancel buttons)
    Confirm,
    /// Prompt dialog (text input + OK/Cancel)
    Prompt,
}

impl std::fmt::Display for DialogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Confirm => write!(f, "confirm"),
            Self::Prompt => write!(f, "prompt"),
        }
    }
}

/// A dialog the page raised and how it was answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    dialog_type: DialogType,
    message: String,
    accepted: bool,
}

impl Dialog {
    /// Rebuild a dialog that was already answered
    #[must_use]
    pub fn answered(dialog_type: DialogType, message: impl Into<String>, accepted: bool) -> Self {
        Self {
            dialog_type,
            message: message.into(),
            accepted,
        }
    }

    /// Get dialog type
    #[must_use]
    pub fn dialog_type(&self) -> DialogType {
        self.dialog_type
    }

    /// Get dialog message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the page saw an OK
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// Configuration for automatic dialog handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoDialogBehavior {
    /// Accept all dialogs automatically
    #[default]
    AcceptAll,
    /// Dismiss all dialogs automatically
    DismissAll,
}

impl AutoDialogBehavior {
    /// Answer a dialog of `dialog_type`; alerts have no cancel and are always
    /// accepted
    #[must_use]
    pub fn answer(&self, dialog_type: DialogType, message: impl Into<String>) -> Dialog {
        let accepted = match dialog_type {
            DialogType::Alert => true,
            DialogType::Confirm | DialogType::Prompt => *self == Self::AcceptAll,
        };
        Dialog::answered(dialog_type, message, accepted)
    }

    /// Script installed into every document so native dialogs never block
    /// the page; answers are recorded in `window.__chumsDialogs`
    #[must_use]
    pub const fn init_script(&self) -> &'static str {
        match self {
            Self::AcceptAll => {
                "(() => { window.__chumsDialogs = []; \
                 const rec = (type, message, accepted) => { \
                 window.__chumsDialogs.push({type, message: String(message ?? ''), accepted}); }; \
                 window.confirm = m => { rec('confirm', m, true); return true; }; \
                 window.alert = m => { rec('alert', m, true); }; \
                 window.prompt = (m, d) => { rec('prompt', m, true); return d ?? ''; }; })()"
            }
            Self::DismissAll => {
                "(() => { window.__chumsDialogs = []; \
                 const rec = (type, message, accepted) => { \
                 window.__chumsDialogs.push({type, message: String(message ?? ''), accepted}); }; \
                 window.confirm = m => { rec('confirm', m, false); return false; }; \
                 window.alert = m => { rec('alert', m, true); }; \
                 window.prompt = m => { rec('prompt', m, false); return null; }; })()"
            }
        }
    }
}
