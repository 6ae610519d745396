//! File-based session store.
//!
//! Stores each session as one JSON file under a base directory. Good enough
//! for the console demo and single-node deployments; anything bigger should
//! implement the port against a real database.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::SessionState;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// File-per-session implementation of the session store port.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_file(&self, session_id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.json", session_id))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, session_id: SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        let path = self.session_file(session_id);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        let state = serde_json::from_str(&json)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(state))
    }

    async fn save(
        &self,
        session_id: SessionId,
        state: &SessionState,
    ) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.session_file(session_id), json)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        let path = self.session_file(session_id);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
