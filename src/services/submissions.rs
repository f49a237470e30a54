//! Submission store seam

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::SubmissionRecord;
use crate::utils::errors::Result;

/// Append-only sink for completed inquiries
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn append(&self, record: &SubmissionRecord) -> Result<()>;
}

/// Keeps submissions in process memory
#[derive(Debug, Default)]
pub struct MemorySubmissionStore {
    records: RwLock<Vec<SubmissionRecord>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub async fn records(&self) -> Vec<SubmissionRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        debug!(submission_id = %record.id, total = records.len(), "Submission kept in memory");
        Ok(())
    }
}
