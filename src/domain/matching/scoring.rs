//! Retrieval-stage hybrid scoring.
//!
//! Combines rule-based condition matching with the externally supplied
//! semantic similarity into a single hybrid score per candidate. The final
//! ranking stage uses a different weight set; the two are never conflated.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::CandidateItem;
use crate::domain::profile::AttributeProfile;

/// Filter score assigned when a candidate has no conditions the profile can
/// evaluate yet.
pub const NEUTRAL_FILTER_SCORE: f64 = 0.5;

/// Weight set for the retrieval-stage hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub filter: f64,
    pub similarity: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            filter: 0.6,
            similarity: 0.4,
        }
    }
}

/// A candidate with its retrieval-stage scores attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub item: CandidateItem,
    /// Fraction of evaluable conditions the profile satisfies.
    pub filter_score: f64,
    /// Semantic similarity as supplied by the retrieval collaborator.
    pub similarity_score: f64,
    /// Weighted combination of the two, clamped to [0,1].
    pub hybrid_score: f64,
}

/// Computes hybrid scores for retrieved candidates.
#[derive(Debug, Clone, Default)]
pub struct HybridScorer {
    weights: HybridWeights,
}

impl HybridScorer {
    /// Creates a scorer with the given retrieval-stage weights.
    pub fn new(weights: HybridWeights) -> Self {
        Self { weights }
    }

    /// Fraction of the candidate's conditions satisfied by the profile.
    ///
    /// Only conditions on attributes the profile knows participate; a
    /// candidate with zero evaluable conditions scores the neutral 0.5.
    pub fn filter_score(item: &CandidateItem, profile: &AttributeProfile) -> f64 {
        let mut evaluable = 0u32;
        let mut satisfied = 0u32;

        for (attribute, condition) in &item.conditions {
            if let Some(value) = profile.get(attribute) {
                evaluable += 1;
                if condition.matches(value) {
                    satisfied += 1;
                }
            }
        }

        if evaluable == 0 {
            NEUTRAL_FILTER_SCORE
        } else {
            f64::from(satisfied) / f64::from(evaluable)
        }
    }

    /// Scores a single candidate against the profile.
    pub fn score(&self, item: CandidateItem, profile: &AttributeProfile) -> ScoredCandidate {
        let filter_score = Self::filter_score(&item, profile);
        let similarity_score = item.similarity.clamp(0.0, 1.0);
        let hybrid_score = (self.weights.filter * filter_score
            + self.weights.similarity * similarity_score)
            .clamp(0.0, 1.0);

        ScoredCandidate {
            item,
            filter_score,
            similarity_score,
            hybrid_score,
        }
    }

    /// Scores all candidates and sorts them best-first.
    ///
    /// Ordering is hybrid score descending, program id ascending on equal
    /// scores, so the result is fully deterministic.
    pub fn score_all(
        &self,
        items: Vec<CandidateItem>,
        profile: &AttributeProfile,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = items
            .into_iter()
            .map(|item| self.score(item, profile))
            .collect();

        scored.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item.id.cmp(&b.item.id))
        });

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Condition;
    use crate::domain::foundation::ProgramId;

    fn candidate(id: &str) -> CandidateItem {
        CandidateItem::new(ProgramId::new(id).unwrap(), format!("Program {}", id))
    }

    fn profile_with_age(age: f64) -> AttributeProfile {
        let mut profile = AttributeProfile::new();
        profile.set("age", age);
        profile
    }

    #[test]
    fn filter_score_counts_only_evaluable_conditions() {
        let item = candidate("p1")
            .with_condition("age", Condition::range(18.0, 39.0))
            .with_condition("region", Condition::one_of(&["Seoul"]));

        // Region unknown: only the age condition participates.
        let profile = profile_with_age(25.0);
        assert_eq!(HybridScorer::filter_score(&item, &profile), 1.0);

        // Both known, one satisfied.
        let mut profile = profile_with_age(25.0);
        profile.set("region", "Busan");
        assert_eq!(HybridScorer::filter_score(&item, &profile), 0.5);
    }

    #[test]
    fn filter_score_neutral_when_nothing_evaluable() {
        let item = candidate("p1").with_condition("age", Condition::range(18.0, 39.0));
        let profile = AttributeProfile::new();
        assert_eq!(
            HybridScorer::filter_score(&item, &profile),
            NEUTRAL_FILTER_SCORE
        );
    }

    #[test]
    fn hybrid_score_uses_retrieval_weights() {
        let item = candidate("p1")
            .with_condition("age", Condition::range(18.0, 39.0))
            .with_similarity(0.5);
        let profile = profile_with_age(25.0);

        let scored = HybridScorer::default().score(item, &profile);
        assert_eq!(scored.filter_score, 1.0);
        assert_eq!(scored.similarity_score, 0.5);
        assert!((scored.hybrid_score - (0.6 * 1.0 + 0.4 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn score_all_sorts_descending_with_id_tiebreak() {
        let profile = AttributeProfile::new();
        let items = vec![
            candidate("p2").with_similarity(0.9),
            candidate("p1").with_similarity(0.9),
            candidate("p3").with_similarity(0.2),
        ];

        let scored = HybridScorer::default().score_all(items, &profile);
        let ids: Vec<&str> = scored.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "p3"]);
    }

    #[test]
    fn hybrid_score_is_clamped() {
        let item = candidate("p1").with_similarity(1.0);
        let profile = AttributeProfile::new();
        let scorer = HybridScorer::new(HybridWeights {
            filter: 1.0,
            similarity: 1.0,
        });
        let scored = scorer.score(item, &profile);
        assert!(scored.hybrid_score <= 1.0);
    }
}
