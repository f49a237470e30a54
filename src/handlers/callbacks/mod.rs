//! Callback query handlers module
//!
//! Menu button presses are parsed into a [`MenuAction`] and applied by the
//! flow engine. The pressed message is edited in place with the first reply.

use teloxide::{prelude::*, types::{CallbackQuery, ChatId}};
use tracing::{debug, warn};

use crate::flow::MenuAction;
use crate::handlers::delivery;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, context: AppContext) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    // Answer the callback query first to remove loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let data = match query.data.as_deref() {
        Some(data) => data,
        None => {
            debug!(user_id = user_id, "Callback query without data");
            return Ok(());
        }
    };

    let action = match data.parse::<MenuAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!(user_id = user_id, callback_data = %data, error = %e, "Ignoring unknown callback");
            return Ok(());
        }
    };

    let (chat_id, message_id) = match &query.message {
        Some(message) => (message.chat().id, Some(message.id())),
        None => (ChatId(user_id), None),
    };

    debug!(user_id = user_id, action = %action, "Processing menu selection");

    let session = context.sessions.get(user_id).await;
    let outcome = context.engine.select(user_id, session, &action);
    context.sessions.put(user_id, outcome.session).await;

    delivery::deliver(&bot, chat_id, message_id, &outcome.replies).await
}
