//! Error types for the parts of the crate that can fail.
//!
//! Dispatching an event never fails; these cover the shell around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when turning operator input into a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command key '{0}'")]
    Unknown(char),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
