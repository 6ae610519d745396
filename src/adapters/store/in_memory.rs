//! In-memory session store.
//!
//! Keeps session state in a process-local map. Useful for testing and
//! development; offers no durability.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::SessionState;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory implementation of the session store port.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    states: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Ok(self.states.read().await.get(&session_id).cloned())
    }

    async fn save(
        &self,
        session_id: SessionId,
        state: &SessionState,
    ) -> Result<(), SessionStoreError> {
        self.states.write().await.insert(session_id, state.clone());
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        self.states.write().await.remove(&session_id);
        Ok(())
    }
}
