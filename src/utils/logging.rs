//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the intake bot.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::flow::{Field, Step};
use crate::models::SubmissionRecord;
use crate::utils::errors::{IntakeError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| IntakeError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "intake-bot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| IntakeError::Config(format!("Failed to install logger: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a step change in a user's flow
pub fn log_flow_transition(user_id: i64, from: Option<Step>, to: Option<Step>, field: Option<Field>) {
    debug!(
        user_id = user_id,
        from = ?from,
        to = ?to,
        field = ?field,
        "Flow transition"
    );
}

/// Log the outcome of a submission attempt
pub fn log_submission(record: &SubmissionRecord, success: bool) {
    if success {
        info!(
            submission_id = %record.id,
            profile = %record.profile,
            submitter = %record.submitter_handle,
            category = ?record.category,
            "Submission stored"
        );
    } else {
        error!(
            submission_id = %record.id,
            profile = %record.profile,
            submitter = %record.submitter_handle,
            "Submission failed"
        );
    }
}
