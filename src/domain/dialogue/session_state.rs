//! Per-conversation session state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::{AttributeProfile, AttributeValue};

/// The externally persisted record of one dialogue session.
///
/// # Invariants
///
/// - `turn_count == questions_asked.len()` at all times; both change only
///   through [`SessionState::record_question`], the turn's single mutation
///   point.
/// - `questions_asked` contains no duplicates.
/// - Profile keys only ever grow (see [`AttributeProfile`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    profile: AttributeProfile,
    questions_asked: Vec<String>,
    turn_count: u32,
}

impl SessionState {
    /// Creates the state for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The attributes known so far.
    pub fn profile(&self) -> &AttributeProfile {
        &self.profile
    }

    /// Attributes the engine has asked about, in ask order.
    pub fn questions_asked(&self) -> &[String] {
        &self.questions_asked
    }

    /// Number of questions asked so far.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Merges extracted deltas into the profile.
    pub fn merge_deltas(&mut self, deltas: BTreeMap<String, AttributeValue>) {
        self.profile.merge(deltas);
    }

    /// Whether an attribute has already been asked about.
    pub fn has_asked(&self, attribute: &str) -> bool {
        self.questions_asked.iter().any(|q| q == attribute)
    }

    /// Records that a question was issued for `attribute`.
    ///
    /// # Errors
    ///
    /// `DuplicateQuestion` if the attribute was already asked; the selector
    /// filters asked attributes, so hitting this indicates a caller bug.
    pub fn record_question(&mut self, attribute: &str) -> Result<(), DomainError> {
        if self.has_asked(attribute) {
            return Err(DomainError::new(
                ErrorCode::DuplicateQuestion,
                format!("attribute '{}' was already asked", attribute),
            ));
        }
        self.questions_asked.push(attribute.to_string());
        self.turn_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.profile().is_empty());
        assert!(state.questions_asked().is_empty());
        assert_eq!(state.turn_count(), 0);
    }

    #[test]
    fn record_question_keeps_count_in_sync() {
        let mut state = SessionState::new();
        state.record_question("region").unwrap();
        state.record_question("age").unwrap();

        assert_eq!(state.turn_count() as usize, state.questions_asked().len());
        assert_eq!(state.questions_asked(), ["region", "age"]);
    }

    #[test]
    fn record_question_rejects_duplicates() {
        let mut state = SessionState::new();
        state.record_question("region").unwrap();

        let err = state.record_question("region").unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateQuestion);
        assert_eq!(state.turn_count(), 1);
    }

    #[test]
    fn asked_attribute_can_still_be_answered() {
        // Asking and knowing are not mutually exclusive: the user's answer
        // lands in the profile on the following turn.
        let mut state = SessionState::new();
        state.record_question("region").unwrap();

        let mut deltas = BTreeMap::new();
        deltas.insert("region".to_string(), AttributeValue::from("Seoul"));
        state.merge_deltas(deltas);

        assert!(state.has_asked("region"));
        assert!(state.profile().contains("region"));
    }

    #[test]
    fn state_roundtrips_through_json() {
        let mut state = SessionState::new();
        state.record_question("age").unwrap();
        let mut deltas = BTreeMap::new();
        deltas.insert("age".to_string(), AttributeValue::Number(29.0));
        state.merge_deltas(deltas);

        let json = serde_json::to_string(&state).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
