//! Fetch configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. The Red List token is normally supplied through the
//! `IUCN_REDLIST_TOKEN` environment variable.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FetchError, Result};

/// Environment variable that overrides [`FetchConfig::redlist_token`].
pub const REDLIST_TOKEN_ENV: &str = "IUCN_REDLIST_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User agent for API requests.
const DEFAULT_API_USER_AGENT: &str = concat!("flora-harvest/", env!("CARGO_PKG_VERSION"));

/// Endpoints, identities, and credentials used by the fetchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub api_user_agent: String,
    /// Sent to the Euro+Med data portal, which rejects unknown clients.
    pub browser_user_agent: String,
    /// Base of the Euro+Med CDM REST API.
    pub euromed_api: String,
    /// Base of the Euro+Med data portal serving taxon pages.
    pub euromed_portal: String,
    /// Base of the BGCI tools site.
    pub bgci_base: String,
    /// Base of the IUCN Red List API (v3).
    pub redlist_api: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redlist_token: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_user_agent: DEFAULT_API_USER_AGENT.to_string(),
            browser_user_agent: "Mozilla/5.0".to_string(),
            euromed_api: "https://api.cybertaxonomy.org/euromed/portal".to_string(),
            euromed_portal: "https://europlusmed.org".to_string(),
            bgci_base: "https://tools.bgci.org".to_string(),
            redlist_api: "https://apiv3.iucnredlist.org/api/v3".to_string(),
            redlist_token: None,
        }
    }
}

impl FetchConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| FetchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| FetchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded fetch config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults, then apply the
    /// environment's token override.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_token_override(std::env::var(REDLIST_TOKEN_ENV).ok()))
    }

    /// Replace the Red List token when `token` is non-empty.
    #[must_use]
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.redlist_token = Some(token);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The Red List token, or a configuration error naming how to set it.
    pub fn redlist_token(&self) -> Result<&str> {
        self.redlist_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                FetchError::Config(format!(
                    "no IUCN Red List token; set {REDLIST_TOKEN_ENV} or redlist_token in the config file"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.browser_user_agent, "Mozilla/5.0");
        assert!(config.api_user_agent.starts_with("flora-harvest/"));
        assert!(config.redlist_token.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config = FetchConfig::from_toml_str(
            r#"
            timeout_secs = 5
            euromed_portal = "http://localhost:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.euromed_portal, "http://localhost:8080");
        assert_eq!(config.bgci_base, FetchConfig::default().bgci_base);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(FetchConfig::from_toml_str("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_token_override() {
        let config = FetchConfig {
            redlist_token: Some("from-file".to_string()),
            ..FetchConfig::default()
        };
        let config = config.with_token_override(Some("from-env".to_string()));
        assert_eq!(config.redlist_token().unwrap(), "from-env");

        let config = config.with_token_override(Some("  ".to_string()));
        assert_eq!(config.redlist_token().unwrap(), "from-env");
    }

    #[test]
    fn test_missing_token() {
        let err = FetchConfig::default().redlist_token().unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
        assert!(err.to_string().contains(REDLIST_TOKEN_ENV));
    }
}
