//! Application context shared by the handlers

use std::sync::Arc;

use crate::config::{SessionBackend, Settings};
use crate::flow::{FlowEngine, FlowProfile};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

use super::storage::{MemorySessionStore, RedisSessionStore, SessionStore};

/// Application-wide context containing the engine and the session store
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub engine: Arc<FlowEngine>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppContext {
    pub fn new(settings: Settings, engine: Arc<FlowEngine>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            settings,
            engine,
            sessions,
        }
    }

    /// Create from the service factory, connecting the configured session backend
    pub async fn from_factory(factory: ServiceFactory, profile: FlowProfile, settings: Settings) -> Result<Self> {
        let sessions: Arc<dyn SessionStore> = match settings.sessions.backend {
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
            SessionBackend::Redis => {
                let store = RedisSessionStore::new(settings.sessions.clone()).await?;
                store.test_connection().await?;
                Arc::new(store)
            }
        };

        let engine = Arc::new(FlowEngine::new(
            Arc::new(profile),
            factory.paraphraser,
            factory.submissions,
        ));

        Ok(Self::new(settings, engine, sessions))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("profile", &self.engine.profile().name)
            .field("session_backend", &self.settings.sessions.backend)
            .finish_non_exhaustive()
    }
}
