//! Turn results - the tagged union returned from every dialogue turn.

use serde::{Deserialize, Serialize};

use crate::domain::matching::{MatchQuality, RankedItem, StopReason};

/// Progress indicator attached to question turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnProgress {
    /// Questions asked so far, including this one.
    pub current_step: u32,
    /// The question budget.
    pub max_steps: u32,
    /// Expected information gain of the question being asked.
    pub information_gain: f64,
}

/// The engine decided to ask one more question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTurn {
    /// Attribute being asked about.
    pub field: String,
    /// Phrased question for the UI.
    pub question: String,
    /// Answer options; empty for free-text attributes.
    pub options: Vec<String>,
    /// Whether the UI should gate this question behind a consent step.
    pub requires_consent: bool,
    pub progress: TurnProgress,
}

/// The engine stopped and produced its final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalTurn {
    /// Summary line for the UI.
    pub message: String,
    /// Ranked result list, best first, at most ten items.
    pub recommendations: Vec<RankedItem>,
    /// Justifications for the top three recommendations.
    pub recommendation_reasons: Vec<String>,
    pub stop_reason: StopReason,
    pub match_quality: MatchQuality,
}

/// Result of one dialogue turn.
///
/// A sum type rather than a stringly-tagged map so handling both variants is
/// exhaustiveness-checked at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnResult {
    Question(QuestionTurn),
    FinalResult(FinalTurn),
}

impl TurnResult {
    /// Whether this turn ended the dialogue.
    pub fn is_final(&self) -> bool {
        matches!(self, TurnResult::FinalResult(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::Grade;

    #[test]
    fn question_turn_serializes_with_type_tag() {
        let turn = TurnResult::Question(QuestionTurn {
            field: "region".to_string(),
            question: "Which region do you live in?".to_string(),
            options: vec!["Seoul".to_string(), "Busan".to_string()],
            requires_consent: false,
            progress: TurnProgress {
                current_step: 1,
                max_steps: 6,
                information_gain: 0.7,
            },
        });

        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["type"], "question");
        assert_eq!(json["field"], "region");
        assert_eq!(json["progress"]["max_steps"], 6);
    }

    #[test]
    fn final_turn_serializes_with_type_tag() {
        let turn = TurnResult::FinalResult(FinalTurn {
            message: "Found 0 matching support programs.".to_string(),
            recommendations: Vec::new(),
            recommendation_reasons: Vec::new(),
            stop_reason: StopReason::FewCandidates,
            match_quality: MatchQuality {
                score: 0.0,
                grade: Grade::F,
            },
        });

        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["type"], "final_result");
        assert_eq!(json["stop_reason"], "few_candidates");
        assert_eq!(json["match_quality"]["grade"], "F");
        assert!(turn.is_final());
    }
}
