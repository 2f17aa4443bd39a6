//! Error types for content and configuration loading
//!
//! None of these escape to the player: callers log them and fall back
//! (skip the level file, use default tuning/settings).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one level source into a usable [`crate::LevelDefinition`]
#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level '{0}' has no valid patterns")]
    Empty(String),
}

/// Failure to load a tuning or settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
