//! Remote store configuration
//!
//! Loaded from TOML or built programmatically. Holds only what the HTTP
//! client needs; there is no application-level timeout or retry knob on
//! purpose.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Remote store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base URL (trailing slash is trimmed)
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// With User-Agent header
    #[inline]
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        Ok(config.normalized())
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            user_agent: format!("deskhub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML did not parse
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = StoreConfig::new();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert!(config.user_agent.starts_with("deskhub/"));
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let config = StoreConfig::new().with_base_url("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn parses_partial_toml() {
        let config = StoreConfig::from_toml_str(r#"base_url = "https://api.example.com/""#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert!(config.user_agent.starts_with("deskhub/"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            StoreConfig::from_toml_str("base_url = ["),
            Err(ConfigError::Parse(_))
        ));
    }
}
