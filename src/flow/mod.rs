//! Conversation flow
//!
//! Steps, menu actions, profiles and the engine that drives a user through
//! the intake questions.

pub mod action;
pub mod engine;
pub mod menu;
pub mod profile;
pub mod reply;
pub mod step;

pub use action::MenuAction;
pub use engine::{FlowEngine, Outcome};
pub use profile::FlowProfile;
pub use reply::{Button, Reply};
pub use step::{next_after, Field, Step, Transition};
