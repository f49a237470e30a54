//! Menu actions carried in inline button callback data

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::IntakeError;

/// A menu selection event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MenuAction {
    /// Back to the main menu
    MainMenu,
    /// Open the inquiry flow
    Inquiry,
    /// Pick a category for a new inquiry
    Category(String),
    /// Show the chat contact card
    Chat,
    /// Show the services overview
    Services,
    /// Show one service description
    Service(String),
}

impl MenuAction {
    /// Encode as callback data (`action[:param]`)
    pub fn callback_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::MainMenu => f.write_str("menu"),
            MenuAction::Inquiry => f.write_str("inquiry"),
            MenuAction::Category(key) => write!(f, "category:{}", key),
            MenuAction::Chat => f.write_str("chat"),
            MenuAction::Services => f.write_str("services"),
            MenuAction::Service(key) => write!(f, "service:{}", key),
        }
    }
}

impl FromStr for MenuAction {
    type Err = IntakeError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let (action, param) = match data.split_once(':') {
            Some((action, param)) => (action, Some(param)),
            None => (data, None),
        };

        match (action, param) {
            ("menu", None) => Ok(MenuAction::MainMenu),
            ("inquiry", None) => Ok(MenuAction::Inquiry),
            ("chat", None) => Ok(MenuAction::Chat),
            ("services", None) => Ok(MenuAction::Services),
            ("category", Some(key)) if !key.is_empty() => Ok(MenuAction::Category(key.to_string())),
            ("service", Some(key)) if !key.is_empty() => Ok(MenuAction::Service(key.to_string())),
            _ => Err(IntakeError::UnknownAction(data.to_string())),
        }
    }
}

impl TryFrom<String> for MenuAction {
    type Error = IntakeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MenuAction> for String {
    fn from(action: MenuAction) -> Self {
        action.callback_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!("menu".parse::<MenuAction>().unwrap(), MenuAction::MainMenu);
        assert_eq!("inquiry".parse::<MenuAction>().unwrap(), MenuAction::Inquiry);
        assert_eq!("chat".parse::<MenuAction>().unwrap(), MenuAction::Chat);
        assert_eq!("services".parse::<MenuAction>().unwrap(), MenuAction::Services);
    }

    #[test]
    fn test_parse_parameterised_actions() {
        assert_eq!(
            "category:core".parse::<MenuAction>().unwrap(),
            MenuAction::Category("core".to_string())
        );
        assert_eq!(
            "service:audit".parse::<MenuAction>().unwrap(),
            MenuAction::Service("audit".to_string())
        );
        assert_eq!(MenuAction::Service("infra".to_string()).callback_data(), "service:infra");
    }

    #[test]
    fn test_reject_malformed_data() {
        assert_matches!("category:".parse::<MenuAction>(), Err(IntakeError::UnknownAction(_)));
        assert_matches!("menu:extra".parse::<MenuAction>(), Err(IntakeError::UnknownAction(_)));
        assert_matches!("lang:en".parse::<MenuAction>(), Err(IntakeError::UnknownAction(_)));
        assert_matches!("".parse::<MenuAction>(), Err(IntakeError::UnknownAction(_)));
    }

    #[test]
    fn test_deserialize_from_profile_string() {
        #[derive(Deserialize)]
        struct Entry {
            action: MenuAction,
        }

        let entry: Entry = toml::from_str("action = \"services\"").unwrap();
        assert_eq!(entry.action, MenuAction::Services);
    }
}
