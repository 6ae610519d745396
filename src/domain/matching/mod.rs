//! Matching core - scoring, stopping criteria, question selection, ranking.

mod condition_matrix;
mod question_selector;
mod ranker;
mod scoring;
mod stopping;

pub use condition_matrix::ConditionMatrix;
pub use question_selector::{QuestionSelector, SelectedQuestion};
pub use ranker::{
    FinalRanker, Grade, MatchQuality, RankedItem, RankingWeights, MAX_RESULTS, RECENCY_FLOOR,
};
pub use scoring::{HybridScorer, HybridWeights, ScoredCandidate, NEUTRAL_FILTER_SCORE};
pub use stopping::{StopReason, StoppingPolicy};
