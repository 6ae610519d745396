//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where session state lives between turns.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-based session store.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_dir: default_session_dir(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    PathBuf::from("./data/sessions")
}
