//! Dialogue Orchestrator - the single per-turn decision function.
//!
//! One `advance` call runs the whole turn: merge extracted conditions,
//! retrieve and score candidates, decide whether to stop, and either rank
//! the final results or pick the next question. Collaborators come in
//! through the constructor so tests can substitute fakes per instance.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::matching::{
    FinalRanker, HybridScorer, MatchQuality, QuestionSelector, ScoredCandidate, StopReason,
    StoppingPolicy,
};
use crate::domain::profile::AttributeRegistry;
use crate::ports::{CandidateRetriever, ConditionExtractor};

use super::{FinalTurn, QuestionTurn, SessionState, TurnProgress, TurnResult};

/// Number of recommendation reasons surfaced in a final result.
const TOP_REASONS: usize = 3;

/// Drives one turn of the matching dialogue.
pub struct DialogueOrchestrator {
    extractor: Arc<dyn ConditionExtractor>,
    retriever: Arc<dyn CandidateRetriever>,
    registry: AttributeRegistry,
    scorer: HybridScorer,
    stopping: StoppingPolicy,
    selector: QuestionSelector,
    ranker: FinalRanker,
}

impl DialogueOrchestrator {
    /// Creates an orchestrator with default scoring weights and stopping
    /// thresholds and the standard attribute registry.
    pub fn new(
        extractor: Arc<dyn ConditionExtractor>,
        retriever: Arc<dyn CandidateRetriever>,
    ) -> Self {
        Self::with_registry(extractor, retriever, AttributeRegistry::standard())
    }

    /// Creates an orchestrator with a custom attribute registry.
    pub fn with_registry(
        extractor: Arc<dyn ConditionExtractor>,
        retriever: Arc<dyn CandidateRetriever>,
        registry: AttributeRegistry,
    ) -> Self {
        Self {
            extractor,
            retriever,
            selector: QuestionSelector::new(registry.clone()),
            registry,
            scorer: HybridScorer::default(),
            stopping: StoppingPolicy::default(),
            ranker: FinalRanker::default(),
        }
    }

    /// Replaces the hybrid scorer.
    pub fn with_scorer(mut self, scorer: HybridScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replaces the stopping policy.
    pub fn with_stopping(mut self, stopping: StoppingPolicy) -> Self {
        self.stopping = stopping;
        self
    }

    /// Replaces the final ranker.
    pub fn with_ranker(mut self, ranker: FinalRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Runs one dialogue turn.
    ///
    /// Never fails: extraction errors leave the profile unchanged and
    /// retrieval errors degrade to an empty candidate set, both logged. The
    /// returned state is the input state advanced by exactly this turn.
    pub async fn advance(
        &self,
        mut state: SessionState,
        user_message: &str,
    ) -> (SessionState, TurnResult) {
        // 1. Merge extracted conditions into the profile.
        match self.extractor.extract(user_message, state.profile()).await {
            Ok(extraction) => {
                debug!(
                    deltas = extraction.deltas.len(),
                    confidence = extraction.confidence,
                    "merging extracted conditions"
                );
                state.merge_deltas(extraction.deltas);
            }
            Err(err) => {
                warn!(error = %err, "condition extraction failed; continuing with unchanged profile");
            }
        }

        // 2. Fresh candidate snapshot for this turn. A failed retrieval is
        //    logged separately from a genuinely empty result so operators can
        //    tell the two apart; both route through the few-candidates stop.
        let candidates = match self.retriever.retrieve(state.profile()).await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "candidate retrieval failed; treating as empty candidate set");
                Vec::new()
            }
        };

        // 3. Retrieval-stage hybrid scoring.
        let scored = self.scorer.score_all(candidates, state.profile());

        // 4. Stopping check against the fresh snapshot.
        if let Some(reason) = self.stopping.evaluate(&scored, state.questions_asked()) {
            info!(stop_reason = %reason, candidates = scored.len(), "dialogue stopped");
            let turn = self.finalize(&scored, &state, reason);
            return (state, TurnResult::FinalResult(turn));
        }

        // 5. Pick the next question.
        let selection = self
            .selector
            .select(&scored, state.profile(), state.questions_asked());

        match selection {
            Some(question) => {
                if let Err(err) = state.record_question(&question.attribute) {
                    // Unreachable by the selector's exclusion rule.
                    warn!(error = %err, "selected attribute was already asked; stopping");
                    let turn = self.finalize(&scored, &state, StopReason::NoMoreQuestions);
                    return (state, TurnResult::FinalResult(turn));
                }

                info!(
                    attribute = %question.attribute,
                    information_gain = question.information_gain,
                    turn = state.turn_count(),
                    "asking next question"
                );

                let turn = QuestionTurn {
                    question: self.registry.prompt_for(&question.attribute),
                    options: self.registry.options(&question.attribute).to_vec(),
                    requires_consent: self.registry.requires_consent(&question.attribute),
                    progress: TurnProgress {
                        current_step: state.turn_count(),
                        max_steps: self.stopping.max_questions as u32,
                        information_gain: question.information_gain,
                    },
                    field: question.attribute,
                };
                (state, TurnResult::Question(turn))
            }
            None => {
                // 6. Selector exhausted - not an error, just a terminal path.
                info!(candidates = scored.len(), "no eligible question left; stopping");
                let turn = self.finalize(&scored, &state, StopReason::NoMoreQuestions);
                (state, TurnResult::FinalResult(turn))
            }
        }
    }

    /// Builds the terminal result for any stop reason.
    fn finalize(
        &self,
        scored: &[ScoredCandidate],
        state: &SessionState,
        stop_reason: StopReason,
    ) -> FinalTurn {
        let recommendations = self
            .ranker
            .rank(scored, state.profile(), Timestamp::now());

        let recommendation_reasons = recommendations
            .iter()
            .take(TOP_REASONS)
            .map(|item| item.justification.clone())
            .collect();

        let match_quality = MatchQuality::from_items(&recommendations);

        FinalTurn {
            message: format!(
                "Found {} matching support programs.",
                recommendations.len()
            ),
            recommendations,
            recommendation_reasons,
            stop_reason,
            match_quality,
        }
    }
}
