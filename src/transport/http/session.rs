//! HTTP session management for the MCP transport
//!
//! Sessions are created by `initialize`, identified by a UUID carried in the
//! `Mcp-Session-Id` header, and expire after an idle timeout. Expired
//! sessions are swept whenever a new one is requested.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Default idle timeout
pub const SESSION_IDLE_MINUTES: i64 = 30;

/// Session metadata
#[derive(Debug, Clone)]
pub struct McpSession {
    pub session_id: Uuid,

    /// Client metadata (User-Agent, declared client name)
    pub client_metadata: HashMap<String, String>,

    pub created_at: DateTime<Utc>,

    /// Updated on each request
    pub last_activity: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl McpSession {
    fn new(client_metadata: HashMap<String, String>, idle_timeout: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            client_metadata,
            created_at: now,
            last_activity: now,
            expires_at: now + idle_timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Update last activity and extend expiration
    fn touch(&mut self, idle_timeout: Duration) {
        let now = Utc::now();
        self.last_activity = now;
        self.expires_at = now + idle_timeout;
    }
}

/// Thread-safe session store
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, McpSession>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self::with_idle_timeout(max_sessions, Duration::minutes(SESSION_IDLE_MINUTES))
    }

    pub fn with_idle_timeout(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_timeout,
        }
    }

    // Every write leaves the map consistent, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, McpSession>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, McpSession>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a new session and store it
    ///
    /// # Errors
    /// - `SessionLimitExceeded` if `max_sessions` live sessions already exist
    pub fn create_session(
        &self,
        client_metadata: HashMap<String, String>,
    ) -> Result<Uuid, SessionError> {
        let removed = self.cleanup_expired_sessions();
        if removed > 0 {
            tracing::debug!(removed, "Removed expired HTTP sessions");
        }

        let mut sessions = self.write();

        if sessions.len() >= self.max_sessions {
            return Err(SessionError::SessionLimitExceeded(self.max_sessions));
        }

        let session = McpSession::new(client_metadata, self.idle_timeout);
        let session_id = session.session_id;
        sessions.insert(session_id, session);

        Ok(session_id)
    }

    /// Validate a session and refresh its activity timestamp
    ///
    /// # Errors
    /// - `SessionNotFound` if the ID doesn't exist
    /// - `SessionExpired` if the idle timeout passed; the session is removed
    pub fn validate_session(&self, session_id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.write();

        match sessions.get_mut(&session_id) {
            Some(session) if session.is_expired() => {
                sessions.remove(&session_id);
                Err(SessionError::SessionExpired(session_id))
            }
            Some(session) => {
                session.touch(self.idle_timeout);
                Ok(())
            }
            None => Err(SessionError::SessionNotFound(session_id)),
        }
    }

    pub fn get_session(&self, session_id: Uuid) -> Option<McpSession> {
        self.read().get(&session_id).cloned()
    }

    /// Remove expired sessions, returning how many were dropped
    pub fn cleanup_expired_sessions(&self) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        let now = Utc::now();

        sessions.retain(|_, session| session.expires_at >= now);

        before - sessions.len()
    }

    pub fn session_count(&self) -> usize {
        self.read().len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(crate::config::http::DEFAULT_MAX_SESSIONS)
    }
}

/// Session-related errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session expired: {0}")]
    SessionExpired(Uuid),

    #[error("Session limit exceeded: maximum {0} concurrent sessions")]
    SessionLimitExceeded(usize),

    #[error("Invalid session ID format")]
    InvalidSessionId,
}
