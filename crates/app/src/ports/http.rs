//! HTTP port — a single request/response exchange with the REST API.
//!
//! Implementations observe the full response (status, headers and raw body)
//! and only fail when no response was obtained at all. Interpreting the
//! status is left to the services.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use libris_domain::error::LibrisError;

/// Header carrying the total number of items of a paged list.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Content type of partial updates.
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request. `path` is relative to the API root (`api/books/1`).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Overrides `application/json` for requests with a body.
    pub content_type: Option<&'static str>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

/// A response as received, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: &serde_json::Value) -> Self {
        self.body = body.to_string().into_bytes();
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the body holds a value. An empty body and a literal `null`
    /// both count as "no body".
    #[must_use]
    pub fn has_body(&self) -> bool {
        let trimmed = self.body.trim_ascii();
        !trimmed.is_empty() && trimmed != b"null"
    }

    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.header(TOTAL_COUNT_HEADER)?.trim().parse().ok()
    }
}

/// Sends requests to the REST API.
pub trait HttpClient: Send + Sync {
    /// Perform one exchange.
    ///
    /// Non-success statuses are **not** errors at this level; only a missing
    /// response is.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, LibrisError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, LibrisError>> + Send {
        (**self).send(request)
    }
}
