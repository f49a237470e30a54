//! Test doubles for the engine's collaborators

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_bot::models::SubmissionRecord;
use intake_bot::services::{Paraphraser, SubmissionStore};
use intake_bot::utils::errors::{IntakeError, Result};

/// Upper-cases its input and remembers every call
#[derive(Debug, Default)]
pub struct RecordingParaphraser {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingParaphraser {
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Paraphraser for RecordingParaphraser {
    async fn paraphrase(&self, instruction: &str, text: &str) -> Result<String> {
        self.calls
            .lock()
            .await
            .push((instruction.to_string(), text.to_string()));
        Ok(format!("PARAPHRASED {}", text.to_uppercase()))
    }
}

/// Always fails, counting attempts
#[derive(Debug, Default)]
pub struct FailingParaphraser {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl Paraphraser for FailingParaphraser {
    async fn paraphrase(&self, _instruction: &str, _text: &str) -> Result<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(IntakeError::Paraphrase("service unavailable".to_string()))
    }
}

/// Rejects every record
#[derive(Debug, Default)]
pub struct FailingSubmissionStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl SubmissionStore for FailingSubmissionStore {
    async fn append(&self, _record: &SubmissionRecord) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(IntakeError::InvalidInput("store offline".to_string()))
    }
}

/// Answers every request with a reply far past Telegram's message limit
#[derive(Debug, Default)]
pub struct VerboseParaphraser;

#[async_trait]
impl Paraphraser for VerboseParaphraser {
    async fn paraphrase(&self, _instruction: &str, _text: &str) -> Result<String> {
        Ok("so much to say ".repeat(1000))
    }
}
