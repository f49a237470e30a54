//! Help command handler

use teloxide::{prelude::*, types::Message, utils::command::BotCommands};

use super::Command;
use crate::handlers::delivery;
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_html;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, context: AppContext) -> Result<()> {
    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0);
    let session = context.sessions.get(user_id).await;

    let mut outcome = context.engine.help(session);
    let commands = escape_html(&Command::descriptions().to_string());
    if let Some(reply) = outcome.replies.first_mut() {
        reply.text = format!("{}\n\n{}", reply.text, commands);
    }

    delivery::deliver(&bot, msg.chat.id, None, &outcome.replies).await
}
