//! Candidate items and their eligibility conditions.
//!
//! Candidates are produced fresh by the retrieval collaborator on every turn
//! and discarded afterwards; the core never persists them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProgramId, Timestamp};
use crate::domain::profile::AttributeValue;

/// An eligibility predicate a program places on one profile attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Numeric value must fall within the (optionally open-ended) range.
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Text value must be one of the allowed values.
    OneOf { values: Vec<String> },
    /// Flag value must equal the required flag.
    Requires { flag: bool },
}

impl Condition {
    /// Checks whether a known profile value satisfies this condition.
    ///
    /// A type mismatch (e.g. text where a range is required) is a non-match.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match self {
            Condition::Range { min, max } => match value.as_number() {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            },
            Condition::OneOf { values } => match value.as_text() {
                Some(s) => values.iter().any(|v| v == s),
                None => false,
            },
            Condition::Requires { flag } => value.as_flag() == Some(*flag),
        }
    }

    /// Canonical string form used for distinct-value counting.
    ///
    /// Equal conditions always produce the same fingerprint; `OneOf` values
    /// are sorted so authoring order does not affect distinctness.
    pub fn fingerprint(&self) -> String {
        match self {
            Condition::Range { min, max } => {
                let lo = min.map_or("-inf".to_string(), |v| v.to_string());
                let hi = max.map_or("+inf".to_string(), |v| v.to_string());
                format!("range[{},{}]", lo, hi)
            }
            Condition::OneOf { values } => {
                let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                format!("one_of[{}]", sorted.join("|"))
            }
            Condition::Requires { flag } => format!("requires[{}]", flag),
        }
    }

    /// Convenience constructor for a closed numeric range.
    pub fn range(min: f64, max: f64) -> Self {
        Condition::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Convenience constructor for an allowed value set.
    pub fn one_of(values: &[&str]) -> Self {
        Condition::OneOf {
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A support program as seen by the matching core for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Opaque corpus identifier.
    pub id: ProgramId,
    /// Human-readable program title.
    pub title: String,
    /// Eligibility conditions keyed by attribute name.
    pub conditions: std::collections::BTreeMap<String, Condition>,
    /// Semantic similarity against the current query context, in [0,1].
    pub similarity: f64,
    /// Normalized popularity signal from corpus metadata, in [0,1].
    pub popularity: f64,
    /// When the program was published.
    pub created_at: Timestamp,
}

impl CandidateItem {
    /// Creates a candidate with no conditions and neutral external signals.
    pub fn new(id: ProgramId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            conditions: std::collections::BTreeMap::new(),
            similarity: 0.0,
            popularity: 0.0,
            created_at: Timestamp::now(),
        }
    }

    /// Adds an eligibility condition.
    pub fn with_condition(mut self, attribute: impl Into<String>, condition: Condition) -> Self {
        self.conditions.insert(attribute.into(), condition);
        self
    }

    /// Sets the similarity score, clamped to [0,1].
    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = similarity.clamp(0.0, 1.0);
        self
    }

    /// Sets the popularity score, clamped to [0,1].
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity.clamp(0.0, 1.0);
        self
    }

    /// Sets the publication timestamp.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }
}
