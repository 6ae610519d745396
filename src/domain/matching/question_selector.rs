//! Information-gain-based question selection.

use tracing::debug;

use crate::domain::profile::{AttributeProfile, AttributeRegistry};
use super::{ConditionMatrix, ScoredCandidate};

/// The attribute chosen for the next question.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedQuestion {
    pub attribute: String,
    /// The coverage-times-discretion score that won the selection; surfaced
    /// to callers as the expected information gain.
    pub information_gain: f64,
}

/// Chooses the single highest-value attribute to ask about next.
///
/// Each eligible attribute is scored `coverage * (1 - sensitivity)`:
/// diversity across the candidate set, discounted by how invasive the
/// attribute is to ask about. Ties break to the ascending attribute name so
/// selection is deterministic.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    registry: AttributeRegistry,
}

impl QuestionSelector {
    /// Creates a selector backed by the given attribute registry.
    pub fn new(registry: AttributeRegistry) -> Self {
        Self { registry }
    }

    /// Picks the best attribute to ask about, or `None` when nothing is
    /// eligible (everything asked or already known).
    pub fn select(
        &self,
        candidates: &[ScoredCandidate],
        profile: &AttributeProfile,
        questions_asked: &[String],
    ) -> Option<SelectedQuestion> {
        let matrix = ConditionMatrix::build(candidates);

        let mut best: Option<SelectedQuestion> = None;
        for attribute in matrix.attributes() {
            if questions_asked.iter().any(|q| q == attribute) || profile.contains(attribute) {
                continue;
            }

            let coverage = matrix.coverage(attribute);
            let sensitivity = self.registry.sensitivity(attribute);
            let value = coverage * (1.0 - sensitivity);
            debug!(%attribute, coverage, sensitivity, value, "scored askable attribute");

            // Strictly-greater comparison over a name-ordered scan makes the
            // lexicographically smallest attribute win ties.
            let improves = match &best {
                Some(current) => value > current.information_gain,
                None => true,
            };
            if improves {
                best = Some(SelectedQuestion {
                    attribute: attribute.clone(),
                    information_gain: value,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CandidateItem, Condition};
    use crate::domain::foundation::ProgramId;
    use crate::domain::profile::AttributeDefinition;

    fn scored(item: CandidateItem) -> ScoredCandidate {
        ScoredCandidate {
            item,
            filter_score: 0.5,
            similarity_score: 0.5,
            hybrid_score: 0.5,
        }
    }

    fn candidate(id: &str) -> CandidateItem {
        CandidateItem::new(ProgramId::new(id).unwrap(), id)
    }

    fn selector() -> QuestionSelector {
        QuestionSelector::new(AttributeRegistry::standard())
    }

    /// Candidates where `region` varies across all three and `support_type`
    /// is uniform; both attributes carry sensitivity 0.3 and 0.2.
    fn diverse_candidates() -> Vec<ScoredCandidate> {
        vec![
            scored(
                candidate("p1")
                    .with_condition("region", Condition::one_of(&["Seoul"]))
                    .with_condition("support_type", Condition::one_of(&["startup"])),
            ),
            scored(
                candidate("p2")
                    .with_condition("region", Condition::one_of(&["Busan"]))
                    .with_condition("support_type", Condition::one_of(&["startup"])),
            ),
            scored(
                candidate("p3")
                    .with_condition("region", Condition::one_of(&["Daegu"]))
                    .with_condition("support_type", Condition::one_of(&["startup"])),
            ),
        ]
    }

    #[test]
    fn prefers_diverse_low_sensitivity_attribute() {
        // region: coverage 1.0, sensitivity 0.3 -> 0.7
        // support_type: coverage 1/3, sensitivity 0.2 -> 0.267
        let choice = selector()
            .select(&diverse_candidates(), &AttributeProfile::new(), &[])
            .unwrap();
        assert_eq!(choice.attribute, "region");
        assert!((choice.information_gain - 0.7).abs() < 1e-12);
    }

    #[test]
    fn skips_already_asked_attributes() {
        let asked = vec!["region".to_string()];
        let choice = selector()
            .select(&diverse_candidates(), &AttributeProfile::new(), &asked)
            .unwrap();
        assert_eq!(choice.attribute, "support_type");
    }

    #[test]
    fn skips_attributes_already_in_profile() {
        let mut profile = AttributeProfile::new();
        profile.set("region", "Seoul");
        let choice = selector()
            .select(&diverse_candidates(), &profile, &[])
            .unwrap();
        assert_eq!(choice.attribute, "support_type");
    }

    #[test]
    fn returns_none_when_everything_is_excluded() {
        let mut profile = AttributeProfile::new();
        profile.set("region", "Seoul");
        let asked = vec!["support_type".to_string()];
        assert!(selector()
            .select(&diverse_candidates(), &profile, &asked)
            .is_none());
    }

    #[test]
    fn returns_none_for_empty_candidate_set() {
        assert!(selector()
            .select(&[], &AttributeProfile::new(), &[])
            .is_none());
    }

    #[test]
    fn ties_break_to_lexicographically_smaller_name() {
        // Scenario E: two unregistered attributes with identical coverage and
        // the default sensitivity tie exactly; "alpha" must win over "beta".
        let candidates = vec![
            scored(
                candidate("p1")
                    .with_condition("beta", Condition::one_of(&["x"]))
                    .with_condition("alpha", Condition::one_of(&["x"])),
            ),
            scored(
                candidate("p2")
                    .with_condition("beta", Condition::one_of(&["y"]))
                    .with_condition("alpha", Condition::one_of(&["y"])),
            ),
        ];

        let choice = selector()
            .select(&candidates, &AttributeProfile::new(), &[])
            .unwrap();
        assert_eq!(choice.attribute, "alpha");
    }

    #[test]
    fn selection_is_deterministic_for_identical_inputs() {
        let candidates = diverse_candidates();
        let profile = AttributeProfile::new();
        let first = selector().select(&candidates, &profile, &[]);
        let second = selector().select(&candidates, &profile, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn fully_sensitive_attribute_scores_zero_but_is_still_eligible() {
        let mut registry = AttributeRegistry::standard();
        registry.register(AttributeDefinition::new("criminal_record", 1.0).unwrap());

        let candidates = vec![scored(
            candidate("p1").with_condition("criminal_record", Condition::Requires { flag: false }),
        )];

        // Nothing else to ask, so even a zero-value attribute is returned.
        let choice = QuestionSelector::new(registry)
            .select(&candidates, &AttributeProfile::new(), &[])
            .unwrap();
        assert_eq!(choice.attribute, "criminal_record");
        assert_eq!(choice.information_gain, 0.0);
    }
}
