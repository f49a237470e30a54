//! Command handlers module
//!
//! This module contains handlers for all bot commands

pub mod help;
pub mod start;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Open the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
}

pub use help::handle_help;
pub use start::handle_start;
