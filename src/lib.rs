//! Intake Bot
//!
//! A Telegram bot that greets prospects, offers a menu of services and walks
//! them through a short questionnaire. Each completed questionnaire becomes
//! one stored inquiry record.

pub mod config;
pub mod database;
pub mod flow;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{IntakeError, Result};

// Re-export main components for easy access
pub use flow::{FlowEngine, FlowProfile, MenuAction, Outcome};
pub use services::ServiceFactory;
pub use state::{AppContext, Session, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
