//! Condition Extractor Port - Interface for the NLU collaborator.
//!
//! Turns a raw user message into structured attribute deltas against the
//! current profile. The extraction itself (LLM call, rule engine, ...) lives
//! behind this trait; the core only merges the deltas it returns.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::profile::{AttributeProfile, AttributeValue};

/// Structured result of one extraction call.
///
/// Deltas carry only attributes the extractor actually found a value for;
/// "no information" is expressed by omission, never by a null-like value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedConditions {
    /// Attribute values to merge into the profile.
    pub deltas: BTreeMap<String, AttributeValue>,
    /// Extractor's confidence in the deltas, in [0,1].
    pub confidence: f64,
}

impl ExtractedConditions {
    /// Creates an empty extraction result with the given confidence.
    pub fn new(confidence: f64) -> Self {
        Self {
            deltas: BTreeMap::new(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Creates a result carrying no information.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a delta.
    pub fn with_delta(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.deltas.insert(name.into(), value.into());
        self
    }

    /// Whether the extraction found anything.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Condition extractor errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// The extraction backend is unreachable or failing.
    #[error("extractor unavailable: {message}")]
    Unavailable { message: String },

    /// The extraction call timed out.
    #[error("extraction timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The backend answered but its output could not be parsed.
    #[error("extraction parse error: {0}")]
    Parse(String),
}

impl ExtractorError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractorError::Unavailable { .. } | ExtractorError::Timeout { .. }
        )
    }
}

/// Port for the condition-extraction collaborator.
///
/// Implementations must not mutate the profile they are given; it is passed
/// only as context for disambiguation.
#[async_trait]
pub trait ConditionExtractor: Send + Sync {
    /// Extracts attribute deltas from a user message.
    async fn extract(
        &self,
        message: &str,
        current_profile: &AttributeProfile,
    ) -> Result<ExtractedConditions, ExtractorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_deltas() {
        let extraction = ExtractedConditions::new(0.8)
            .with_delta("age", 29.0)
            .with_delta("region", "Seoul");

        assert_eq!(extraction.deltas.len(), 2);
        assert_eq!(extraction.confidence, 0.8);
        assert!(!extraction.is_empty());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(ExtractedConditions::new(1.4).confidence, 1.0);
        assert_eq!(ExtractedConditions::new(-0.2).confidence, 0.0);
    }

    #[test]
    fn empty_extraction_has_no_deltas() {
        assert!(ExtractedConditions::empty().is_empty());
    }

    #[test]
    fn retryable_classification() {
        assert!(ExtractorError::unavailable("down").is_retryable());
        assert!(ExtractorError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(!ExtractorError::parse("bad json").is_retryable());
    }
}
