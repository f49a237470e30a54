//! Database repositories module

pub mod submission;

pub use submission::SubmissionRepository;
