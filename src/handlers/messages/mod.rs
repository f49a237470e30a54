//! Message handlers module
//!
//! Free text in a private chat is routed to the flow engine. Unknown
//! commands get the help text and never count as answers. Other message
//! kinds are ignored.

use teloxide::{prelude::*, types::Message};
use tracing::debug;

use crate::handlers::delivery;
use crate::models::Submitter;
use crate::state::AppContext;
use crate::utils::errors::{IntakeError, Result};

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, context: AppContext) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| IntakeError::InvalidInput("No user in message".to_string()))?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let text = match msg.text() {
        Some(text) => text,
        None => {
            debug!(user_id = user_id, chat_id = ?chat_id, "Ignoring non-text message");
            return Ok(());
        }
    };

    if text.starts_with('/') {
        debug!(user_id = user_id, command = %text, "Unknown command, sending help");
        let session = context.sessions.get(user_id).await;
        let outcome = context.engine.help(session);
        return delivery::deliver(&bot, chat_id, None, &outcome.replies).await;
    }

    let submitter = Submitter::from_parts(&user.first_name, user.last_name.as_deref(), user.username.as_deref());
    let session = context.sessions.get(user_id).await;
    debug!(user_id = user_id, step = ?session.expected, "Processing message");

    let outcome = context.engine.handle_text(user_id, session, text, &submitter).await;
    context.sessions.put(user_id, outcome.session).await;

    delivery::deliver(&bot, chat_id, None, &outcome.replies).await
}
