//! REST API client configuration.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::HttpAdapterError;
use crate::ReqwestHttpClient;

/// Configuration for the REST API client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Root the `api/...` resource paths are resolved against.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            token: None,
            timeout_secs: 30,
            user_agent: concat!("libris/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    /// The base URL, normalised with a trailing slash so relative paths are
    /// appended rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpAdapterError::InvalidUrl`] if `base_url` does not parse.
    pub fn base(&self) -> Result<Url, HttpAdapterError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|err| HttpAdapterError::InvalidUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpAdapterError::InvalidUrl`] for a malformed base URL or
    /// [`HttpAdapterError::Build`] if the TLS backend cannot initialise.
    pub fn build(&self) -> Result<ReqwestHttpClient, HttpAdapterError> {
        let base_url = self.base()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(HttpAdapterError::Build)?;
        tracing::debug!(%base_url, timeout_secs = self.timeout_secs, "http client ready");
        Ok(ReqwestHttpClient::new(client, base_url, self.token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert!(config.token.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("libris/"));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            base_url = "https://library.example.com/admin"
            token = "secret"
            timeout_secs = 5
            user_agent = "librisctl"
        "#;
        let config: HttpClientConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://library.example.com/admin");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "librisctl");
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: HttpClientConfig = toml::from_str(r#"token = "t""#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn should_append_trailing_slash_to_base() {
        let config = HttpClientConfig {
            base_url: "https://library.example.com/admin".to_string(),
            ..HttpClientConfig::default()
        };
        assert_eq!(
            config.base().unwrap().as_str(),
            "https://library.example.com/admin/"
        );
    }

    #[test]
    fn should_reject_malformed_base() {
        let config = HttpClientConfig {
            base_url: "not a url".to_string(),
            ..HttpClientConfig::default()
        };
        assert!(matches!(
            config.base(),
            Err(HttpAdapterError::InvalidUrl { .. })
        ));
    }
}
