//! Transport-neutral outgoing messages

use super::action::MenuAction;

/// One outgoing message: HTML text plus an optional inline keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Callback { label: String, action: MenuAction },
    Link { label: String, url: String },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn has_keyboard(&self) -> bool {
        !self.keyboard.is_empty()
    }

    /// All callback actions offered by the keyboard, row by row
    pub fn actions(&self) -> Vec<&MenuAction> {
        self.keyboard
            .iter()
            .flatten()
            .filter_map(|button| match button {
                Button::Callback { action, .. } => Some(action),
                Button::Link { .. } => None,
            })
            .collect()
    }
}

impl Button {
    pub fn callback(label: impl Into<String>, action: MenuAction) -> Self {
        Button::Callback {
            label: label.into(),
            action,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}
