//! Data models module
//!
//! This module contains the records persisted by the application

pub mod submission;

// Re-export commonly used models
pub use submission::{SubmissionRecord, Submitter};
