//! Session Store Port - Interface for persisting session state.
//!
//! The core is stateless between turns; callers load state, advance, and
//! save. This port defines that persistence boundary. Callers must also
//! guarantee at most one in-flight advance per session id; the store offers
//! no locking.

use async_trait::async_trait;

use crate::domain::dialogue::SessionState;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("failed to serialize session state: {0}")]
    SerializationFailed(String),

    #[error("failed to deserialize session state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for persisting and loading session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the state for a session, or `None` for a fresh session.
    async fn load(&self, session_id: SessionId) -> Result<Option<SessionState>, SessionStoreError>;

    /// Saves the state for a session, overwriting any previous state.
    async fn save(
        &self,
        session_id: SessionId,
        state: &SessionState,
    ) -> Result<(), SessionStoreError>;

    /// Deletes all state for a session.
    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError>;
}
