//! Test data helpers for creating test objects
//!
//! Telegram updates are built from the same JSON the Bot API sends.

use serde_json::json;
use teloxide::types::{CallbackQuery, Message};

use super::telegram_mock::test_user_id;

fn user_json() -> serde_json::Value {
    json!({
        "id": test_user_id(),
        "is_bot": false,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "username": "ada"
    })
}

fn private_chat_json() -> serde_json::Value {
    json!({
        "id": test_user_id(),
        "first_name": "Ada",
        "last_name": "Lovelace",
        "username": "ada",
        "type": "private"
    })
}

/// Text message sent by the test user in a private chat
pub fn create_test_message(text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 10,
        "date": 1640995200,
        "chat": private_chat_json(),
        "from": user_json(),
        "text": text
    }))
    .expect("valid message json")
}

/// Callback query for a button on bot message 123
pub fn create_test_callback_query(data: &str) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "4382bfdwdsb323b2d9",
        "from": user_json(),
        "chat_instance": "-8245345345",
        "data": data,
        "message": {
            "message_id": 123,
            "date": 1640995200,
            "chat": private_chat_json(),
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "TestBot",
                "username": "test_bot"
            },
            "text": "Menu"
        }
    }))
    .expect("valid callback query json")
}
