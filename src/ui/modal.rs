//! Overlay dialog open/close state

use serde::{Deserialize, Serialize};

/// Element identifiers for one modal instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Id of the modal container (also the dimmed backdrop)
    pub modal_id: String,
    /// Id of the element that opens the modal
    pub open_id: String,
    /// Class of the close control inside the modal
    pub close_class: String,
}

impl ModalConfig {
    pub fn new(modal_id: &str, open_id: &str, close_class: &str) -> Self {
        Self {
            modal_id: modal_id.to_string(),
            open_id: open_id.to_string(),
            close_class: close_class.to_string(),
        }
    }

    /// Modals present on the portfolio page
    pub fn defaults() -> Vec<ModalConfig> {
        vec![
            ModalConfig::new("resume-modal", "open-resume", "close-resume"),
            ModalConfig::new("dob-modal", "open-dob", "close-dob"),
        ]
    }

    /// CSS selector for the close control
    pub fn close_selector(&self) -> String {
        format!(".{}", self.close_class)
    }

    /// Look up the container and open trigger by id.
    ///
    /// Returns `None` unless both are present; a modal without either is
    /// left unwired.
    pub fn resolve<E>(&self, lookup: impl Fn(&str) -> Option<E>) -> Option<(E, E)> {
        let container = lookup(&self.modal_id)?;
        let trigger = lookup(&self.open_id)?;
        Some((container, trigger))
    }
}

/// Where a click landed, relative to one modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    OpenTrigger,
    CloseControl,
    /// Target is the modal container itself, not one of its children
    Backdrop,
    /// Anything else, including content inside the modal
    Content,
}

impl ModalClick {
    /// Classify a page-level click by whether its target is the container
    pub fn from_target(target_is_modal: bool) -> Self {
        if target_is_modal {
            ModalClick::Backdrop
        } else {
            ModalClick::Content
        }
    }

    /// Classify a page-level click from its event target. Only a click on
    /// the container itself counts as a backdrop click; children do not.
    pub fn from_event_target<T: PartialEq>(target: Option<&T>, container: &T) -> Self {
        Self::from_target(target.is_some_and(|t| t == container))
    }
}

/// CSS `display` value applied to the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Flex => "flex",
            Display::None => "none",
        }
    }
}

/// One modal's visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub config: ModalConfig,
    open: bool,
}

impl Modal {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply a click; returns the display value to set, if any
    pub fn handle(&mut self, click: ModalClick) -> Option<Display> {
        match click {
            ModalClick::OpenTrigger => {
                self.open = true;
                Some(Display::Flex)
            }
            ModalClick::CloseControl | ModalClick::Backdrop => {
                self.open = false;
                Some(Display::None)
            }
            ModalClick::Content => None,
        }
    }
}
