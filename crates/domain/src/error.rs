//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LibrisError`]
//! via `#[from]`.

/// Top-level error returned by every fallible operation in libris.
#[derive(Debug, thiserror::Error)]
pub enum LibrisError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("transport error")]
    Transport(#[from] TransportError),
}

/// An entity or argument broke a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An update was requested for an entity that was never persisted.
    #[error("{entity} has no identifier")]
    MissingId { entity: &'static str },

    /// A route or CLI parameter could not be parsed as an identifier.
    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    /// A sort key was not `property` or `property,asc|desc`.
    #[error("invalid sort `{0}`")]
    InvalidSort(String),

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must not be before {other}")]
    DateOrder {
        field: &'static str,
        other: &'static str,
    },
}

/// A required entity does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The exchange with the remote API failed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connection, timeout, …).
    #[error("request failed")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error() {
        let err: LibrisError = ValidationError::MissingId { entity: "Book" }.into();
        assert!(matches!(
            err,
            LibrisError::Validation(ValidationError::MissingId { entity: "Book" })
        ));
    }

    #[test]
    fn should_display_not_found_error() {
        let err = NotFoundError {
            entity: "Spaces",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Spaces 42 not found");
    }

    #[test]
    fn should_display_status_error() {
        let err = TransportError::Status {
            status: 400,
            message: Some("error.idexists".to_string()),
        };
        assert_eq!(err.to_string(), "server responded with status 400");
    }
}
