//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for free text

pub mod callbacks;
pub mod commands;
pub mod delivery;
pub mod messages;

// Re-export commonly used handler functions
pub use callbacks::handle_callback_query;
pub use commands::{handle_help, handle_start, Command};
pub use messages::handle_message;

use teloxide::{types::ChatId, Bot};
use tracing::error;

use crate::state::AppContext;
use crate::utils::errors::IntakeError;

/// Top-level recovery after a failed handler.
///
/// Resets the user's session and sends the generic apology with the main
/// menu. Never fails; delivery errors are only logged.
pub async fn recover(bot: &Bot, context: &AppContext, user_id: i64, chat_id: ChatId, err: &IntakeError) {
    error!(
        user_id = user_id,
        error = %err,
        severity = %err.severity(),
        recoverable = err.is_recoverable(),
        "Handler failed, resetting session"
    );

    context.sessions.reset(user_id).await;
    let outcome = context.engine.failure();
    if let Err(e) = delivery::deliver(bot, chat_id, None, &outcome.replies).await {
        error!(user_id = user_id, error = %e, "Failed to send apology");
    }
}
