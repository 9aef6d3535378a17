//! Runtime configuration for the acceptor and its driver.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of transitions kept in memory.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Settings read from a JSON file, every field optional.
///
/// ```rust
/// use bill_acceptor::config::AcceptorConfig;
///
/// let config = AcceptorConfig::from_json_str(r#"{ "history_limit": 8 }"#).unwrap();
/// assert_eq!(config.history_limit, Some(8));
/// assert!(config.show_menu);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcceptorConfig {
    /// Transitions retained in history; `None` keeps all of them.
    pub history_limit: Option<usize>,

    /// Print the key menu before every prompt.
    pub show_menu: bool,
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            show_menu: true,
        }
    }
}

impl AcceptorConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Apply command-line overrides on top of this configuration.
    ///
    /// A given `history_limit` replaces the configured one; `no_menu`
    /// only ever turns the menu off.
    pub fn with_overrides(mut self, history_limit: Option<usize>, no_menu: bool) -> Self {
        if let Some(limit) = history_limit {
            self.history_limit = Some(limit);
        }
        if no_menu {
            self.show_menu = false;
        }
        self
    }
}
