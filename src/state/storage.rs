//! Session storage
//!
//! Sessions are keyed by Telegram user id. Operations are total: a backend
//! failure is logged and the caller sees the idle default, which forces the
//! user to restart the flow.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::session::Session;
use crate::config::SessionConfig;
use crate::flow::{Field, Step};
use crate::utils::errors::Result;

/// Keyed session tracker
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session, idle when unknown
    async fn get(&self, user_id: i64) -> Session;

    /// Replace the whole session
    async fn put(&self, user_id: i64, session: Session);

    async fn set_expected(&self, user_id: i64, step: Option<Step>) {
        let mut session = self.get(user_id).await;
        session.set_expected(step);
        self.put(user_id, session).await;
    }

    async fn record_answer(&self, user_id: i64, field: Field, value: String) {
        let mut session = self.get(user_id).await;
        session.record_answer(field, value);
        self.put(user_id, session).await;
    }

    async fn reset(&self, user_id: i64) {
        self.put(user_id, Session::default()).await;
    }
}

/// In-process sessions, lost on restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: i64) -> Session {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn put(&self, user_id: i64, session: Session) {
        let mut sessions = self.sessions.write().await;
        if session.is_idle() && session.answers.is_empty() {
            sessions.remove(&user_id);
        } else {
            sessions.insert(user_id, session);
        }
    }

    async fn reset(&self, user_id: i64) {
        self.sessions.write().await.remove(&user_id);
    }
}

/// Redis-backed sessions with a TTL
#[derive(Clone)]
pub struct RedisSessionStore {
    connection_manager: redis::aio::ConnectionManager,
    config: SessionConfig,
}

impl RedisSessionStore {
    pub async fn new(config: SessionConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn session_key(&self, user_id: i64) -> String {
        format!("{}session:{}", self.config.prefix, user_id)
    }

    async fn load(&self, user_id: i64) -> Result<Option<Session>> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        match serialized {
            Some(data) => {
                let session: Session = serde_json::from_str(&data)?;
                debug!(user_id = user_id, step = ?session.expected, "Session loaded from Redis");
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: i64, session: &Session) -> Result<()> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        if session.is_idle() && session.answers.is_empty() {
            let _: u32 = conn.del(&key).await?;
            debug!(user_id = user_id, "Idle session removed from Redis");
            return Ok(());
        }

        let serialized = serde_json::to_string(session)?;
        conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds).await?;
        debug!(user_id = user_id, ttl_seconds = self.config.ttl_seconds, "Session saved to Redis");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, user_id: i64) -> Session {
        match self.load(user_id).await {
            Ok(session) => session.unwrap_or_default(),
            Err(e) => {
                warn!(user_id = user_id, error = %e, "Failed to load session, treating as idle");
                Session::default()
            }
        }
    }

    async fn put(&self, user_id: i64, session: Session) {
        if let Err(e) = self.save(user_id, &session).await {
            error!(user_id = user_id, error = %e, "Failed to save session to Redis");
        }
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("prefix", &self.config.prefix)
            .field("ttl_seconds", &self.config.ttl_seconds)
            .finish_non_exhaustive()
    }
}
