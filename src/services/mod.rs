//! Services module
//!
//! External collaborators of the flow engine: the paraphrase service and the
//! submission store.

pub mod paraphrase;
pub mod submissions;

// Re-export commonly used services
pub use paraphrase::{OpenAiParaphraser, Paraphraser};
pub use submissions::{MemorySubmissionStore, SubmissionStore};

use std::sync::Arc;

use tracing::info;

use crate::config::settings::Settings;
use crate::database::{self, SubmissionRepository};
use crate::utils::errors::Result;

/// Builds the engine's collaborators from settings
#[derive(Clone)]
pub struct ServiceFactory {
    pub paraphraser: Option<Arc<dyn Paraphraser>>,
    pub submissions: Arc<dyn SubmissionStore>,
}

impl ServiceFactory {
    /// Connect the configured services.
    ///
    /// Without a database URL, submissions are kept in memory. Without an
    /// enabled paraphrase section, echoes are always raw text.
    pub async fn new(settings: &Settings) -> Result<Self> {
        let submissions: Arc<dyn SubmissionStore> = match &settings.database.url {
            Some(url) => {
                info!("Connecting to database...");
                let pool = database::create_pool(&database::DatabaseConfig::from_settings(url, &settings.database)).await?;
                database::run_migrations(&pool).await?;
                Arc::new(SubmissionRepository::new(pool))
            }
            None => {
                info!("No database configured, keeping submissions in memory");
                Arc::new(MemorySubmissionStore::new())
            }
        };

        let paraphraser: Option<Arc<dyn Paraphraser>> = if settings.paraphrase.enabled {
            info!(model = %settings.paraphrase.model, "Paraphrasing enabled");
            Some(Arc::new(OpenAiParaphraser::new(&settings.paraphrase)?))
        } else {
            None
        };

        Ok(Self {
            paraphraser,
            submissions,
        })
    }

    pub fn health(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            paraphrase_enabled: self.paraphraser.is_some(),
        }
    }
}

/// Service health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceHealthStatus {
    pub paraphrase_enabled: bool,
}
