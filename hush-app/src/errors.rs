//! Error types for the hush driver.

use hush_data::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown action '{token}' in script (tick {tick})")]
    Script { token: String, tick: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
