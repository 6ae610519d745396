//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Confidence threshold must be within [0,1]")]
    InvalidConfidenceThreshold,

    #[error("Max questions must be at least 1")]
    InvalidMaxQuestions,

    #[error("Information gain floor must be non-negative")]
    InvalidInformationGainFloor,

    #[error("Assumed reduction must be within (0,1]")]
    InvalidAssumedReduction,

    #[error("Score weight '{0}' must be within [0,1]")]
    InvalidWeight(&'static str),
}
