//! AdvanceTurnHandler - run one dialogue turn for a stored session.
//!
//! Implements the load → advance → save pattern around the orchestrator.
//! Extraction and retrieval failures are absorbed inside `advance`; a
//! persistence failure is the one error class that propagates, because it
//! means the turn's outcome could not be durably recorded.
//!
//! Callers must guarantee at most one in-flight turn per session id; two
//! concurrent turns against the same session race on save (last write wins)
//! and can duplicate or drop a question.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::dialogue::{DialogueOrchestrator, SessionState, TurnResult};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to advance a session by one turn.
#[derive(Debug, Clone)]
pub struct AdvanceTurnCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Result of an advanced turn.
#[derive(Debug, Clone)]
pub struct AdvanceTurnResult {
    /// The session state as persisted after this turn.
    pub state: SessionState,
    /// What to show the user next.
    pub turn: TurnResult,
}

/// Error type for advancing turns.
#[derive(Debug, thiserror::Error)]
pub enum AdvanceTurnError {
    /// Session state could not be loaded or saved.
    #[error("session persistence failed: {0}")]
    Persistence(#[from] SessionStoreError),
}

/// Handler for the advance-turn use case.
pub struct AdvanceTurnHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<DialogueOrchestrator>,
}

impl AdvanceTurnHandler {
    /// Creates a handler with its injected collaborators.
    pub fn new(store: Arc<dyn SessionStore>, orchestrator: Arc<DialogueOrchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    /// Runs one turn: load (or create) the session, advance, save.
    #[instrument(skip(self, command), fields(session_id = %command.session_id))]
    pub async fn handle(
        &self,
        command: AdvanceTurnCommand,
    ) -> Result<AdvanceTurnResult, AdvanceTurnError> {
        let state = self
            .store
            .load(command.session_id)
            .await?
            .unwrap_or_default();

        let (state, turn) = self.orchestrator.advance(state, &command.message).await;

        self.store.save(command.session_id, &state).await?;

        Ok(AdvanceTurnResult { state, turn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::extractor::ScriptedExtractor;
    use crate::adapters::store::InMemorySessionStore;
    use crate::domain::catalog::CandidateItem;
    use crate::domain::profile::AttributeProfile;
    use crate::ports::{CandidateRetriever, RetrieverError};

    struct EmptyRetriever;

    #[async_trait]
    impl CandidateRetriever for EmptyRetriever {
        async fn retrieve(
            &self,
            _profile: &AttributeProfile,
        ) -> Result<Vec<CandidateItem>, RetrieverError> {
            Ok(Vec::new())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn load(
            &self,
            _session_id: SessionId,
        ) -> Result<Option<SessionState>, SessionStoreError> {
            Ok(None)
        }

        async fn save(
            &self,
            _session_id: SessionId,
            _state: &SessionState,
        ) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Io("disk full".to_string()))
        }

        async fn delete(&self, _session_id: SessionId) -> Result<(), SessionStoreError> {
            Ok(())
        }
    }

    fn orchestrator() -> Arc<DialogueOrchestrator> {
        Arc::new(DialogueOrchestrator::new(
            Arc::new(ScriptedExtractor::new()),
            Arc::new(EmptyRetriever),
        ))
    }

    #[tokio::test]
    async fn creates_fresh_session_and_persists_state() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = AdvanceTurnHandler::new(store.clone(), orchestrator());
        let session_id = SessionId::new();

        let result = handler
            .handle(AdvanceTurnCommand {
                session_id,
                message: "hello".to_string(),
            })
            .await
            .unwrap();

        // Empty retrieval ends the dialogue immediately...
        assert!(result.turn.is_final());
        // ...and the terminal state is still saved.
        let persisted = store.load(session_id).await.unwrap().unwrap();
        assert_eq!(persisted, result.state);
    }

    #[tokio::test]
    async fn persistence_failure_propagates() {
        let handler = AdvanceTurnHandler::new(Arc::new(FailingStore), orchestrator());

        let result = handler
            .handle(AdvanceTurnCommand {
                session_id: SessionId::new(),
                message: "hello".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AdvanceTurnError::Persistence(_))));
    }
}
