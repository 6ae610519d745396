//! Final ranking, justification, and match-quality grading.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProgramId, Timestamp};
use crate::domain::profile::AttributeProfile;
use super::{HybridScorer, ScoredCandidate};

/// Maximum number of items in a final result.
pub const MAX_RESULTS: usize = 10;

/// Recency never decays below this floor.
pub const RECENCY_FLOOR: f64 = 0.1;

/// Weight set for the four-term final score. Distinct from the
/// retrieval-stage hybrid weights and never interchangeable with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub condition_match: f64,
    pub similarity: f64,
    pub popularity: f64,
    pub recency: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            condition_match: 0.4,
            similarity: 0.3,
            popularity: 0.2,
            recency: 0.1,
        }
    }
}

/// One entry of the terminal result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub id: ProgramId,
    pub title: String,
    pub final_score: f64,
    pub condition_match_score: f64,
    pub similarity_score: f64,
    pub popularity_score: f64,
    pub recency_score: f64,
    pub justification: String,
}

/// Letter grade for aggregate match quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Aggregate quality of a final result list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchQuality {
    pub score: f64,
    pub grade: Grade,
}

impl MatchQuality {
    /// Grades a ranked result list by its average final score.
    ///
    /// An empty list is the distinct F case; a non-empty list never grades
    /// below D.
    pub fn from_items(items: &[RankedItem]) -> Self {
        if items.is_empty() {
            return Self {
                score: 0.0,
                grade: Grade::F,
            };
        }

        let score = items.iter().map(|i| i.final_score).sum::<f64>() / items.len() as f64;
        let grade = if score >= 0.9 {
            Grade::A
        } else if score >= 0.8 {
            Grade::B
        } else if score >= 0.7 {
            Grade::C
        } else {
            Grade::D
        };

        Self { score, grade }
    }
}

/// Produces the terminal ordered result list.
#[derive(Debug, Clone, Default)]
pub struct FinalRanker {
    weights: RankingWeights,
}

impl FinalRanker {
    /// Creates a ranker with the given final-stage weights.
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    /// Ranks candidates against the final profile state.
    ///
    /// Condition match is recomputed here: the profile may have grown since
    /// retrieval scored these candidates. Ordering is final score descending
    /// with ascending program id as the tie-break; the list is truncated to
    /// [`MAX_RESULTS`].
    pub fn rank(
        &self,
        candidates: &[ScoredCandidate],
        profile: &AttributeProfile,
        now: Timestamp,
    ) -> Vec<RankedItem> {
        let mut ranked: Vec<RankedItem> = candidates
            .iter()
            .map(|candidate| self.rank_one(candidate, profile, now))
            .collect();

        ranked.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(MAX_RESULTS);
        ranked
    }

    fn rank_one(
        &self,
        candidate: &ScoredCandidate,
        profile: &AttributeProfile,
        now: Timestamp,
    ) -> RankedItem {
        let condition_match_score = HybridScorer::filter_score(&candidate.item, profile);
        let similarity_score = candidate.similarity_score;
        let popularity_score = candidate.item.popularity.clamp(0.0, 1.0);
        let recency_score = Self::recency_score(&candidate.item.created_at, &now);

        let final_score = (self.weights.condition_match * condition_match_score
            + self.weights.similarity * similarity_score
            + self.weights.popularity * popularity_score
            + self.weights.recency * recency_score)
            .clamp(0.0, 1.0);

        RankedItem {
            id: candidate.item.id.clone(),
            title: candidate.item.title.clone(),
            final_score,
            condition_match_score,
            similarity_score,
            popularity_score,
            recency_score,
            justification: Self::justification(condition_match_score, similarity_score, final_score),
        }
    }

    /// Linear one-year decay with a floor: `max(0.1, 1 - days/365)`.
    fn recency_score(created_at: &Timestamp, now: &Timestamp) -> f64 {
        let days = now.days_since(created_at);
        (1.0 - days as f64 / 365.0).clamp(RECENCY_FLOOR, 1.0)
    }

    /// Short human-readable reason derived from score components.
    fn justification(condition_match: f64, similarity: f64, final_score: f64) -> String {
        let mut reasons: Vec<&str> = Vec::new();
        if condition_match > 0.8 {
            reasons.push("conditions strongly matched");
        }
        if similarity > 0.8 {
            reasons.push("semantically close to request");
        }
        if final_score > 0.9 {
            reasons.push("high overall confidence");
        }

        if reasons.is_empty() {
            "meets basic matching criteria".to_string()
        } else {
            reasons.join(", ")
        }
    }
}
