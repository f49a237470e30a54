//! Test helpers module
//!
//! This module provides utilities and helpers for testing the intake bot.
//! It includes a mock Telegram server, Telegram update builders, collaborator
//! doubles and a conversation driver.

#![allow(dead_code)]

pub mod conversation;
pub mod doubles;
pub mod telegram_mock;
pub mod test_data;

pub use conversation::*;
pub use doubles::*;
pub use telegram_mock::*;
pub use test_data::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
