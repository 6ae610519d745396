//! Scripted condition extractor for testing.
//!
//! Queues canned extraction results (or injected failures) that are consumed
//! in order, and records every call for verification. Tests drive whole
//! dialogues without any NLU backend.
//!
//! # Example
//!
//! ```ignore
//! let extractor = ScriptedExtractor::new()
//!     .with_extraction(ExtractedConditions::new(0.9).with_delta("region", "Seoul"))
//!     .with_failure(ScriptedFailure::Timeout { timeout_secs: 5 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::profile::AttributeProfile;
use crate::ports::{ConditionExtractor, ExtractedConditions, ExtractorError};

/// A queued outcome for one extraction call.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Extraction(ExtractedConditions),
    Failure(ScriptedFailure),
}

/// Failure kinds the scripted extractor can inject.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    Unavailable { message: String },
    Timeout { timeout_secs: u32 },
    Parse { message: String },
}

impl From<ScriptedFailure> for ExtractorError {
    fn from(failure: ScriptedFailure) -> Self {
        match failure {
            ScriptedFailure::Unavailable { message } => ExtractorError::unavailable(message),
            ScriptedFailure::Timeout { timeout_secs } => ExtractorError::Timeout { timeout_secs },
            ScriptedFailure::Parse { message } => ExtractorError::parse(message),
        }
    }
}

/// Scripted extractor for tests.
///
/// Outcomes are consumed in queue order; once the queue is empty every call
/// returns an empty extraction.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExtractor {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExtractor {
    /// Creates an extractor with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction result.
    pub fn with_extraction(self, extraction: ExtractedConditions) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(ScriptedOutcome::Extraction(extraction));
        self
    }

    /// Queues an injected failure.
    pub fn with_failure(self, failure: ScriptedFailure) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(ScriptedOutcome::Failure(failure));
        self
    }

    /// Messages received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }
}

#[async_trait]
impl ConditionExtractor for ScriptedExtractor {
    async fn extract(
        &self,
        message: &str,
        _current_profile: &AttributeProfile,
    ) -> Result<ExtractedConditions, ExtractorError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(message.to_string());

        let outcome = self
            .outcomes
            .lock()
            .expect("outcome queue poisoned")
            .pop_front();

        match outcome {
            Some(ScriptedOutcome::Extraction(extraction)) => Ok(extraction),
            Some(ScriptedOutcome::Failure(failure)) => Err(failure.into()),
            None => Ok(ExtractedConditions::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn consumes_outcomes_in_order() {
        let extractor = ScriptedExtractor::new()
            .with_extraction(ExtractedConditions::new(0.9).with_delta("region", "Seoul"))
            .with_failure(ScriptedFailure::Unavailable {
                message: "down".to_string(),
            });

        let profile = AttributeProfile::new();

        let first = extractor.extract("first", &profile).await.unwrap();
        assert!(first.deltas.contains_key("region"));

        let second = extractor.extract("second", &profile).await;
        assert!(matches!(second, Err(ExtractorError::Unavailable { .. })));

        // Queue drained: empty extraction from here on.
        let third = extractor.extract("third", &profile).await.unwrap();
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn records_calls() {
        let extractor = ScriptedExtractor::new();
        let profile = AttributeProfile::new();

        extractor.extract("hello", &profile).await.unwrap();
        extractor.extract("world", &profile).await.unwrap();

        assert_eq!(extractor.call_count(), 2);
        assert_eq!(extractor.calls(), ["hello", "world"]);
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let extractor = ScriptedExtractor::new()
            .with_extraction(ExtractedConditions::new(0.5));
        let clone = extractor.clone();

        clone.extract("via clone", &AttributeProfile::new()).await.unwrap();
        assert_eq!(extractor.call_count(), 1);
    }
}
