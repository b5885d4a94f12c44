//! HTTP access for the fetchers.
//!
//! Fetchers only see [`HttpClient`], so tests can serve canned responses
//! without touching the network.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};

/// Which identity a request presents to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestProfile {
    /// JSON and CSV APIs; sent with the configured API user agent.
    Api,
    /// HTML pages that reject non-browser clients.
    Browser,
}

impl fmt::Display for RequestProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Browser => write!(f, "browser"),
        }
    }
}

/// Blocking GET of a text body.
pub trait HttpClient {
    /// Fetch `url` and return the body. Non-success statuses are errors.
    fn get_text(&self, url: &str, profile: RequestProfile) -> Result<String>;
}

/// [`HttpClient`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    api_user_agent: String,
    browser_user_agent: String,
}

impl ReqwestClient {
    /// Create a client with the timeout and user agents from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_user_agent: config.api_user_agent.clone(),
            browser_user_agent: config.browser_user_agent.clone(),
        })
    }

    fn user_agent(&self, profile: RequestProfile) -> &str {
        match profile {
            RequestProfile::Api => &self.api_user_agent,
            RequestProfile::Browser => &self.browser_user_agent,
        }
    }
}

impl HttpClient for ReqwestClient {
    fn get_text(&self, url: &str, profile: RequestProfile) -> Result<String> {
        debug!(url = %redact(url), %profile, "GET");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent(profile))
            .send()
            .map_err(|e| FetchError::network(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: redact(url),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::network(url, &e))
    }
}

/// Mask the value of a `token` query parameter so URLs can be logged.
pub(crate) fn redact(url: &str) -> String {
    let Some(start) = url.find("token=").map(|idx| idx + "token=".len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map_or(url.len(), |idx| start + idx);
    format!("{}***{}", &url[..start], &url[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_per_profile() {
        let config = FetchConfig::default();
        let client = ReqwestClient::new(&config).unwrap();
        assert_eq!(client.user_agent(RequestProfile::Browser), "Mozilla/5.0");
        assert_eq!(
            client.user_agent(RequestProfile::Api),
            config.api_user_agent.as_str()
        );
    }

    #[test]
    fn test_redact() {
        assert_eq!(
            redact("https://api.test/species/abies%20alba?token=secret"),
            "https://api.test/species/abies%20alba?token=***"
        );
        assert_eq!(
            redact("https://api.test/x?token=secret&page=2"),
            "https://api.test/x?token=***&page=2"
        );
        assert_eq!(redact("https://api.test/x"), "https://api.test/x");
    }
}
