//! State management module
//!
//! This module tracks per-user sessions and holds the application context

pub mod context;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use context::AppContext;
pub use session::Session;
pub use storage::{MemorySessionStore, RedisSessionStore, SessionStore};
