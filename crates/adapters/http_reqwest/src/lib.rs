//! # libris-adapter-http-reqwest
//!
//! [`HttpClient`] implementation backed by `reqwest`.
//!
//! Resource paths are resolved against the configured base URL, the bearer
//! token (if any) is attached to every request, and the response is handed
//! back whole: statuses are interpreted by the application services.
//!
//! ## Dependency rule
//!
//! Depends on `libris-app` (port traits) and `libris-domain` only.

pub mod config;
pub mod error;

use libris_app::ports::{HttpClient, HttpRequest, HttpResponse, Method};
use libris_domain::error::LibrisError;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

pub use config::HttpClientConfig;
pub use error::HttpAdapterError;

/// REST API client over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ReqwestHttpClient {
    /// Wrap an existing client. `base_url` should end with `/`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: Url, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a resource path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpAdapterError::InvalidUrl`] if `path` cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpAdapterError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| HttpAdapterError::InvalidUrl {
                url: path.to_string(),
                reason: err.to_string(),
            })
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpAdapterError> {
        let url = self.endpoint(&request.path)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = match request.content_type {
                Some(content_type) => builder
                    .header(CONTENT_TYPE, content_type)
                    .body(body.to_string()),
                None => builder.json(body),
            };
        }

        let response = builder.send().await.map_err(HttpAdapterError::Request)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(HttpAdapterError::Request)?
            .to_vec();
        tracing::trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LibrisError> {
        self.execute(request).await.map_err(|err| {
            tracing::warn!(error = %err, "request failed");
            err.into()
        })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_domain::error::TransportError;

    fn client(base_url: &str) -> ReqwestHttpClient {
        HttpClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            ..HttpClientConfig::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn should_resolve_resource_path_under_base() {
        let client = client("http://localhost:8080");
        assert_eq!(
            client.endpoint("api/books/12").unwrap().as_str(),
            "http://localhost:8080/api/books/12"
        );
    }

    #[test]
    fn should_keep_base_path_prefix() {
        let client = client("https://library.example.com/admin/");
        assert_eq!(
            client.endpoint("/api/spaces").unwrap().as_str(),
            "https://library.example.com/admin/api/spaces"
        );
    }

    #[test]
    fn should_map_every_method() {
        assert_eq!(to_reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    async fn should_report_unreachable_server_as_network_error() {
        let client = client("http://127.0.0.1:1/");
        let result = client
            .send(HttpRequest::new(Method::Get, "api/books"))
            .await;
        assert!(matches!(
            result,
            Err(LibrisError::Transport(TransportError::Network(_)))
        ));
    }
}
