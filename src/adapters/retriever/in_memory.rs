//! In-memory program catalog retriever.
//!
//! Serves the candidate-retrieval port from an in-process program list:
//! programs whose conditions contradict a known profile value are dropped,
//! the rest get a keyword-overlap similarity against a query derived from
//! the profile. The similarity is fully deterministic: identical profiles
//! always see identical scores.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::catalog::{CandidateItem, Condition};
use crate::domain::foundation::{ProgramId, Timestamp, ValidationError};
use crate::domain::profile::AttributeProfile;
use crate::ports::{CandidateRetriever, RetrieverError};

/// Similarity assigned when the profile yields no query terms yet.
const NEUTRAL_SIMILARITY: f64 = 0.5;

/// Profile attributes that contribute to the similarity query.
const QUERY_ATTRIBUTES: &[&str] = &["support_type", "employment_status", "region"];

/// One program as stored in the catalog (and in its YAML form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProgram {
    pub id: String,
    pub title: String,
    /// Eligibility conditions keyed by attribute name.
    #[serde(default)]
    pub conditions: BTreeMap<String, Condition>,
    /// Keywords describing the program, matched against the profile query.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Normalized popularity signal in [0,1].
    #[serde(default)]
    pub popularity: f64,
    pub created_at: Timestamp,
}

/// In-memory implementation of the candidate-retrieval port.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    programs: Vec<(ProgramId, CatalogProgram)>,
}

impl InMemoryCatalog {
    /// Creates a catalog, validating program identifiers.
    pub fn new(programs: Vec<CatalogProgram>) -> Result<Self, ValidationError> {
        let programs = programs
            .into_iter()
            .map(|program| Ok((ProgramId::new(program.id.clone())?, program)))
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Ok(Self { programs })
    }

    /// Loads a catalog from its YAML form: a list of programs.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogLoadError> {
        let programs: Vec<CatalogProgram> = serde_yaml::from_str(yaml)?;
        Ok(Self::new(programs)?)
    }

    /// Number of programs in the catalog.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Lowercased query terms derived from the profile.
    fn query_terms(profile: &AttributeProfile) -> BTreeSet<String> {
        QUERY_ATTRIBUTES
            .iter()
            .filter_map(|attr| profile.get(attr))
            .filter_map(|value| value.as_text())
            .map(|text| text.to_lowercase())
            .collect()
    }

    /// Fraction of query terms found among the program's tags.
    fn similarity(program: &CatalogProgram, terms: &BTreeSet<String>) -> f64 {
        if terms.is_empty() {
            return NEUTRAL_SIMILARITY;
        }
        let tags: BTreeSet<String> = program.tags.iter().map(|t| t.to_lowercase()).collect();
        let overlap = terms.intersection(&tags).count();
        overlap as f64 / terms.len() as f64
    }

    /// Whether every condition on a known attribute is satisfied.
    ///
    /// Conditions on attributes the profile does not know yet never
    /// disqualify a program; they are exactly what the dialogue still has to
    /// ask about.
    fn passes_known_conditions(program: &CatalogProgram, profile: &AttributeProfile) -> bool {
        program.conditions.iter().all(|(attribute, condition)| {
            profile
                .get(attribute)
                .map_or(true, |value| condition.matches(value))
        })
    }
}

/// Errors raised while loading a catalog from YAML.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid catalog entry: {0}")]
    Invalid(#[from] ValidationError),
}

#[async_trait]
impl CandidateRetriever for InMemoryCatalog {
    async fn retrieve(
        &self,
        profile: &AttributeProfile,
    ) -> Result<Vec<CandidateItem>, RetrieverError> {
        let terms = Self::query_terms(profile);

        let candidates = self
            .programs
            .iter()
            .filter(|(_, program)| Self::passes_known_conditions(program, profile))
            .map(|(id, program)| {
                let mut item = CandidateItem::new(id.clone(), program.title.clone())
                    .with_similarity(Self::similarity(program, &terms))
                    .with_popularity(program.popularity)
                    .with_created_at(program.created_at);
                item.conditions = program.conditions.clone();
                item
            })
            .collect();

        Ok(candidates)
    }
}
