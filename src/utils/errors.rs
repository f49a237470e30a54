//! Error handling for the intake bot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::flow::Field;

/// Main error type for the intake bot
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Profile parsing error: {0}")]
    ProfileParse(#[from] toml::de::Error),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid flow profile: {0}")]
    Profile(String),

    #[error("Missing answer for {0}")]
    MissingAnswer(Field),

    #[error("Paraphrase service error: {0}")]
    Paraphrase(String),

    #[error("Unknown menu action: {0}")]
    UnknownAction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for intake bot operations
pub type Result<T> = std::result::Result<T, IntakeError>;

impl IntakeError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            IntakeError::Database(_) => false,
            IntakeError::Migration(_) => false,
            IntakeError::Telegram(_) => true,
            IntakeError::Redis(_) => true,
            IntakeError::Http(_) => true,
            IntakeError::Serialization(_) => false,
            IntakeError::ProfileParse(_) => false,
            IntakeError::ConfigLoad(_) => false,
            IntakeError::Io(_) => true,
            IntakeError::UrlParse(_) => false,
            IntakeError::Config(_) => false,
            IntakeError::Profile(_) => false,
            IntakeError::MissingAnswer(_) => false,
            IntakeError::Paraphrase(_) => true,
            IntakeError::UnknownAction(_) => true,
            IntakeError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            IntakeError::Migration(_) => ErrorSeverity::Critical,
            IntakeError::ConfigLoad(_) => ErrorSeverity::Critical,
            IntakeError::Config(_) => ErrorSeverity::Critical,
            IntakeError::Profile(_) => ErrorSeverity::Critical,
            IntakeError::ProfileParse(_) => ErrorSeverity::Critical,
            IntakeError::Paraphrase(_) => ErrorSeverity::Warning,
            IntakeError::UnknownAction(_) => ErrorSeverity::Info,
            IntakeError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
