//! Conversation driver
//!
//! Feeds events to a [`FlowEngine`] the same way the handlers do: load the
//! session, apply the event, store the returned session.

use std::sync::Arc;

use intake_bot::flow::{FlowEngine, FlowProfile, MenuAction, Outcome};
use intake_bot::models::Submitter;
use intake_bot::services::{MemorySubmissionStore, Paraphraser, SubmissionStore};
use intake_bot::state::{MemorySessionStore, Session, SessionStore};

use super::telegram_mock::test_user_id;

pub struct Conversation {
    pub engine: FlowEngine,
    pub sessions: MemorySessionStore,
    pub user_id: i64,
    pub submitter: Submitter,
}

impl Conversation {
    pub fn new(
        profile: FlowProfile,
        paraphraser: Option<Arc<dyn Paraphraser>>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            engine: FlowEngine::new(Arc::new(profile), paraphraser, submissions),
            sessions: MemorySessionStore::new(),
            user_id: test_user_id(),
            submitter: Submitter::from_parts("Ada", Some("Lovelace"), Some("ada")),
        }
    }

    /// Built-in profile, no paraphraser, in-memory store
    pub fn builtin() -> (Self, Arc<MemorySubmissionStore>) {
        let store = Arc::new(MemorySubmissionStore::new());
        let profile = FlowProfile::builtin().expect("built-in profile");
        (Self::new(profile, None, store.clone()), store)
    }

    pub async fn session(&self) -> Session {
        self.sessions.get(self.user_id).await
    }

    async fn apply(&self, outcome: Outcome) -> Outcome {
        self.sessions.put(self.user_id, outcome.session.clone()).await;
        outcome
    }

    pub async fn start(&self) -> Outcome {
        self.apply(self.engine.start()).await
    }

    pub async fn press(&self, action: MenuAction) -> Outcome {
        let session = self.session().await;
        self.apply(self.engine.select(self.user_id, session, &action)).await
    }

    pub async fn say(&self, text: &str) -> Outcome {
        let session = self.session().await;
        let outcome = self
            .engine
            .handle_text(self.user_id, session, text, &self.submitter)
            .await;
        self.apply(outcome).await
    }
}
