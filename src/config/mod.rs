//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `POLICY_NAVIGATOR` prefix and `__` (double underscore) as the nesting
//! separator.
//!
//! # Example
//!
//! ```no_run
//! use policy_navigator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod engine;
mod error;
mod storage;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Matching engine thresholds and weights.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Session storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `POLICY_NAVIGATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `POLICY_NAVIGATOR__ENGINE__MAX_QUESTIONS=4` -> `engine.max_questions = 4`
    /// - `POLICY_NAVIGATOR__STORAGE__SESSION_DIR=...` -> `storage.session_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("POLICY_NAVIGATOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any threshold or weight is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        Ok(())
    }
}
