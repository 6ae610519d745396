//! Candidate Retriever Port - Interface for the corpus search collaborator.
//!
//! Produces the per-turn candidate snapshot: programs whose predicate sets
//! are worth evaluating against the profile, each carrying a semantic
//! similarity score in [0,1] against a query derived from that profile.

use async_trait::async_trait;

use crate::domain::catalog::CandidateItem;
use crate::domain::profile::AttributeProfile;

/// Candidate retriever errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    /// The search backend is unreachable or failing.
    #[error("retriever unavailable: {message}")]
    Unavailable { message: String },

    /// The search call timed out.
    #[error("retrieval timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The profile could not be turned into a valid query.
    #[error("invalid retrieval query: {0}")]
    BadQuery(String),
}

impl RetrieverError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RetrieverError::Unavailable { .. } | RetrieverError::Timeout { .. }
        )
    }
}

/// Port for the candidate-retrieval collaborator.
#[async_trait]
pub trait CandidateRetriever: Send + Sync {
    /// Retrieves candidates matching the current profile.
    ///
    /// The returned items are a disposable per-turn view; the core never
    /// stores them across turns.
    async fn retrieve(&self, profile: &AttributeProfile) -> Result<Vec<CandidateItem>, RetrieverError>;
}
