//! Submission repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::SubmissionRecord;
use crate::services::SubmissionStore;
use crate::utils::errors::Result;

const INSERT_INQUIRY: &str = r#"
    INSERT INTO inquiries (id, submitted_at, profile, submitter_name, submitter_handle,
                           service_area, project_details, meeting_location, contact_info, timeline)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one inquiry row
    pub async fn insert(&self, record: &SubmissionRecord) -> Result<()> {
        sqlx::query(INSERT_INQUIRY)
            .bind(record.id)
            .bind(record.submitted_at)
            .bind(&record.profile)
            .bind(&record.submitter_name)
            .bind(&record.submitter_handle)
            .bind(&record.category)
            .bind(&record.project_description)
            .bind(&record.meeting_context)
            .bind(&record.contact_info)
            .bind(&record.timeline)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        self.insert(record).await
    }
}
