//! Start command handler
//!
//! `/start` abandons any flow in progress and shows the welcome menu

use teloxide::{prelude::*, types::Message};
use tracing::{debug, info};

use crate::handlers::delivery;
use crate::state::AppContext;
use crate::utils::errors::{IntakeError, Result};
use crate::utils::logging::log_flow_transition;

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, context: AppContext) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| IntakeError::InvalidInput("No user in message".to_string()))?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");

    let previous = context.sessions.get(user_id).await;
    if let Some(step) = previous.expected {
        info!(user_id = user_id, step = ?step, "Abandoning flow in progress");
    }

    let outcome = context.engine.start();
    log_flow_transition(user_id, previous.expected, outcome.session.expected, None);
    context.sessions.put(user_id, outcome.session).await;

    delivery::deliver(&bot, chat_id, None, &outcome.replies).await
}
