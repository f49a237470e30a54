//! Reply delivery
//!
//! Turns engine replies into Telegram requests. All text is sent in HTML
//! parse mode.

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
};
use tracing::{debug, warn};

use crate::flow::{Button, Reply};
use crate::utils::errors::Result;

/// Build the inline keyboard for a reply, if it has one
pub fn keyboard_markup(keyboard: &[Vec<Button>]) -> Result<Option<InlineKeyboardMarkup>> {
    if keyboard.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::with_capacity(keyboard.len());
    for row in keyboard {
        let mut buttons = Vec::with_capacity(row.len());
        for button in row {
            buttons.push(match button {
                Button::Callback { label, action } => {
                    InlineKeyboardButton::callback(label.clone(), action.callback_data())
                }
                Button::Link { label, url } => InlineKeyboardButton::url(label.clone(), url::Url::parse(url)?),
            });
        }
        rows.push(buttons);
    }

    Ok(Some(InlineKeyboardMarkup::new(rows)))
}

/// Send a reply as a new message
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    let mut request = bot
        .send_message(chat_id, reply.text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(markup) = keyboard_markup(&reply.keyboard)? {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}

/// Replace the text and keyboard of an existing message
pub async fn edit_reply(bot: &Bot, chat_id: ChatId, message_id: MessageId, reply: &Reply) -> Result<()> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, reply.text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(markup) = keyboard_markup(&reply.keyboard)? {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}

/// Deliver replies in order.
///
/// With `edit`, the first reply replaces that message; if editing fails it is
/// sent as a new message instead.
pub async fn deliver(bot: &Bot, chat_id: ChatId, edit: Option<MessageId>, replies: &[Reply]) -> Result<()> {
    for (index, reply) in replies.iter().enumerate() {
        match edit {
            Some(message_id) if index == 0 => {
                if let Err(e) = edit_reply(bot, chat_id, message_id, reply).await {
                    warn!(chat_id = ?chat_id, error = %e, "Failed to edit message, sending a new one");
                    send_reply(bot, chat_id, reply).await?;
                }
            }
            _ => send_reply(bot, chat_id, reply).await?,
        }
    }

    debug!(chat_id = ?chat_id, count = replies.len(), "Replies delivered");
    Ok(())
}
