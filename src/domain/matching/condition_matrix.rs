//! Per-turn map from candidate attributes to their condition distributions.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::catalog::Condition;
use super::ScoredCandidate;

/// For each attribute referenced by any candidate, the conditions it takes
/// across the current candidate set.
///
/// Derived from one turn's retrieval and discarded with it. Coverage, the
/// ratio of distinct condition values to total occurrences, is the diversity
/// signal the question selector feeds on: an attribute whose conditions
/// differ widely across candidates splits the set well.
#[derive(Debug, Clone, Default)]
pub struct ConditionMatrix {
    columns: BTreeMap<String, Vec<Condition>>,
}

impl ConditionMatrix {
    /// Builds the matrix from the turn's scored candidates.
    pub fn build(candidates: &[ScoredCandidate]) -> Self {
        let mut columns: BTreeMap<String, Vec<Condition>> = BTreeMap::new();

        for candidate in candidates {
            for (attribute, condition) in &candidate.item.conditions {
                columns
                    .entry(attribute.clone())
                    .or_default()
                    .push(condition.clone());
            }
        }

        Self { columns }
    }

    /// Attribute names present in the matrix, in name order.
    pub fn attributes(&self) -> impl Iterator<Item = &String> {
        self.columns.keys()
    }

    /// Conditions observed for an attribute across the candidate set.
    pub fn conditions(&self, attribute: &str) -> Option<&[Condition]> {
        self.columns.get(attribute).map(Vec::as_slice)
    }

    /// Ratio of distinct condition values to total occurrences, in (0,1].
    ///
    /// Zero for attributes absent from the matrix.
    pub fn coverage(&self, attribute: &str) -> f64 {
        match self.columns.get(attribute) {
            Some(conditions) if !conditions.is_empty() => {
                let distinct: BTreeSet<String> =
                    conditions.iter().map(Condition::fingerprint).collect();
                distinct.len() as f64 / conditions.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Whether no candidate declared any condition.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
