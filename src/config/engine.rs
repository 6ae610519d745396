//! Matching engine configuration

use serde::Deserialize;

use crate::domain::matching::{HybridWeights, RankingWeights, StoppingPolicy};

use super::error::ValidationError;

/// Thresholds and weights for the matching engine.
///
/// Defaults mirror the engine's built-in policy; deployments override
/// individual values through the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Stop when the top-3 average hybrid score reaches this.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Question budget per session.
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Stop when at most this many candidates remain.
    #[serde(default = "default_few_candidates_threshold")]
    pub few_candidates_threshold: usize,

    /// Stop when expected information gain falls below this.
    #[serde(default = "default_min_information_gain")]
    pub min_information_gain: f64,

    /// Assumed fractional entropy reduction per question.
    #[serde(default = "default_assumed_reduction")]
    pub assumed_reduction: f64,

    /// Retrieval-stage weight on the condition filter score.
    #[serde(default = "default_filter_weight")]
    pub filter_weight: f64,

    /// Retrieval-stage weight on the semantic similarity score.
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f64,
}

impl EngineConfig {
    /// The stopping policy described by this configuration.
    pub fn stopping_policy(&self) -> StoppingPolicy {
        StoppingPolicy {
            confidence_threshold: self.confidence_threshold,
            max_questions: self.max_questions,
            few_candidates_threshold: self.few_candidates_threshold,
            min_information_gain: self.min_information_gain,
            assumed_reduction: self.assumed_reduction,
        }
    }

    /// The retrieval-stage weights described by this configuration.
    pub fn hybrid_weights(&self) -> HybridWeights {
        HybridWeights {
            filter: self.filter_weight,
            similarity: self.similarity_weight,
        }
    }

    /// The final-stage ranking weights (not currently overridable).
    pub fn ranking_weights(&self) -> RankingWeights {
        RankingWeights::default()
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold);
        }
        if self.max_questions == 0 {
            return Err(ValidationError::InvalidMaxQuestions);
        }
        if self.min_information_gain < 0.0 {
            return Err(ValidationError::InvalidInformationGainFloor);
        }
        if !(0.0..=1.0).contains(&self.assumed_reduction) || self.assumed_reduction == 0.0 {
            return Err(ValidationError::InvalidAssumedReduction);
        }
        if !(0.0..=1.0).contains(&self.filter_weight) {
            return Err(ValidationError::InvalidWeight("filter_weight"));
        }
        if !(0.0..=1.0).contains(&self.similarity_weight) {
            return Err(ValidationError::InvalidWeight("similarity_weight"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_questions: default_max_questions(),
            few_candidates_threshold: default_few_candidates_threshold(),
            min_information_gain: default_min_information_gain(),
            assumed_reduction: default_assumed_reduction(),
            filter_weight: default_filter_weight(),
            similarity_weight: default_similarity_weight(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.95
}

fn default_max_questions() -> usize {
    6
}

fn default_few_candidates_threshold() -> usize {
    2
}

fn default_min_information_gain() -> f64 {
    0.05
}

fn default_assumed_reduction() -> f64 {
    0.3
}

fn default_filter_weight() -> f64 {
    0.6
}

fn default_similarity_weight() -> f64 {
    0.4
}
