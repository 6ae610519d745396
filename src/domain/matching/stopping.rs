//! Stopping criteria for the dialogue loop.
//!
//! Four ordered, short-circuiting rules decide whether to stop asking and
//! return results. The order encodes priority: a confident match wins over
//! everything else, then the turn budget, then corpus exhaustion, then the
//! information-gain floor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ScoredCandidate;

/// Why the dialogue stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Top candidates score above the confidence threshold.
    HighConfidence,
    /// The fixed question budget is spent.
    MaxQuestionsReached,
    /// Too few candidates remain for more questions to help.
    ///
    /// An empty candidate set also stops here; callers distinguish "zero
    /// matches" from "one or two weak matches" by the result list length.
    FewCandidates,
    /// Another question would reduce uncertainty below the floor.
    LowInformationGain,
    /// The selector has no eligible attribute left to ask about.
    NoMoreQuestions,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::HighConfidence => "high_confidence",
            StopReason::MaxQuestionsReached => "max_questions_reached",
            StopReason::FewCandidates => "few_candidates",
            StopReason::LowInformationGain => "low_information_gain",
            StopReason::NoMoreQuestions => "no_more_questions",
        };
        write!(f, "{}", s)
    }
}

/// Thresholds for the four stopping rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoppingPolicy {
    /// Rule 1: stop when the top-3 average hybrid score reaches this.
    pub confidence_threshold: f64,
    /// Rule 2: stop after this many questions.
    pub max_questions: usize,
    /// Rule 3: stop when at most this many candidates remain.
    pub few_candidates_threshold: usize,
    /// Rule 4: stop when expected information gain falls below this.
    pub min_information_gain: f64,
    /// Assumed fractional entropy reduction per question.
    pub assumed_reduction: f64,
}

impl Default for StoppingPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.95,
            max_questions: 6,
            few_candidates_threshold: 2,
            min_information_gain: 0.05,
            assumed_reduction: 0.3,
        }
    }
}

/// Number of top candidates averaged for the confidence rule.
const CONFIDENCE_TOP_N: usize = 3;

impl StoppingPolicy {
    /// Runs the ordered rules; `Some(reason)` means stop now.
    ///
    /// Evaluated fresh each turn against the turn's candidate snapshot;
    /// nothing is memoized, so identical inputs always yield the same
    /// decision.
    pub fn evaluate(
        &self,
        candidates: &[ScoredCandidate],
        questions_asked: &[String],
    ) -> Option<StopReason> {
        // 1. Matching confidence (skipped when there are no candidates).
        if !candidates.is_empty()
            && self.top_confidence(candidates) >= self.confidence_threshold
        {
            return Some(StopReason::HighConfidence);
        }

        // 2. Question budget.
        if questions_asked.len() >= self.max_questions {
            return Some(StopReason::MaxQuestionsReached);
        }

        // 3. Candidate set already small (including empty).
        if candidates.len() <= self.few_candidates_threshold {
            return Some(StopReason::FewCandidates);
        }

        // 4. Information-gain floor.
        if self.expected_information_gain(candidates.len()) < self.min_information_gain {
            return Some(StopReason::LowInformationGain);
        }

        None
    }

    /// Expected entropy reduction from one more question.
    ///
    /// Shannon entropy of a uniform distribution over the candidates,
    /// discounted by the assumed per-question reduction. Zero when one or
    /// fewer candidates remain.
    pub fn expected_information_gain(&self, candidate_count: usize) -> f64 {
        if candidate_count <= 1 {
            return 0.0;
        }
        (candidate_count as f64).log2() * self.assumed_reduction
    }

    /// Average hybrid score of the best (up to) three candidates.
    fn top_confidence(&self, candidates: &[ScoredCandidate]) -> f64 {
        let mut scores: Vec<f64> = candidates.iter().map(|c| c.hybrid_score).collect();
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let top = &scores[..scores.len().min(CONFIDENCE_TOP_N)];
        top.iter().sum::<f64>() / top.len() as f64
    }
}
