//! Typed error handling for link generation
//!
//! Every fallible operation in the crate returns [`HypermediaError`]. The
//! variants follow the failure categories of the pipeline so callers can tell
//! a bad input apart from a misconfigured route table or a misbehaving
//! collaborator.
//!
//! # Error Categories
//!
//! - [`HypermediaError::InvalidArgument`]: the caller supplied a blank or missing value
//! - [`HypermediaError::Parse`]: a link key string was ambiguous or malformed
//! - [`HypermediaError::RouteNotFound`]: the route table has no entry for a route name
//! - [`HypermediaError::Operation`]: a collaborator returned an unusable value
//! - [`HypermediaError::TypeMismatch`]: a context value was read as the wrong type
//! - [`HypermediaError::Config`]: a loaded configuration could not be applied
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get_link(&ctx, request) {
//!     Ok(link) => println!("{}", link.href().unwrap_or_default()),
//!     Err(HypermediaError::RouteNotFound { route_name }) => {
//!         println!("no route named {}", route_name);
//!     }
//!     Err(e) => eprintln!("link generation failed: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = HypermediaError> = std::result::Result<T, E>;

/// The main error type for link generation
#[derive(Debug, Error)]
pub enum HypermediaError {
    /// A caller-supplied argument was blank, missing or null
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// A link key string could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The route table has no entry for the requested route
    #[error("Route '{route_name}' not found")]
    RouteNotFound { route_name: String },

    /// A collaborator (resolver, route table, provider) returned an unusable value
    #[error("{message} ({key}: '{value}')")]
    Operation {
        key: String,
        value: String,
        message: String,
    },

    /// A context value exists but holds a different type than requested
    #[error("Context value '{key}' is a {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A loaded configuration could not be applied
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by the link key parser
///
/// The parser rejects ambiguous input instead of guessing which value was
/// meant, so each variant names the exact rule that was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained no key or value at all
    #[error("Link key is empty")]
    Empty,

    /// A segment had more than one '=' separated assignment
    #[error("Segment '{segment}' has too many parts, expected 'key=value' or a bare id value")]
    TooManyParts { segment: String },

    /// A 'key=value' segment had a blank key
    #[error("Segment '{segment}' has a blank key")]
    BlankKey { segment: String },

    /// The same explicit key appeared twice
    #[error("Key '{key}' is specified more than once")]
    DuplicateKey { key: String },

    /// The reserved id key was assigned twice explicitly
    #[error("Key '{key}' is specified more than once; it is the id key and may only be given once")]
    DuplicateIdKey { key: String },

    /// More than one value was given for the id key
    #[error(
        "Multiple id values found: '{first}' and '{second}'. A value without a key is the value of '{key}', so only one bare value or one '{key}=' assignment is allowed"
    )]
    MultipleIdValues {
        key: String,
        first: String,
        second: String,
    },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl HypermediaError {
    /// Shorthand for an [`HypermediaError::InvalidArgument`]
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        HypermediaError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`HypermediaError::Operation`]
    pub fn operation(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        HypermediaError::Operation {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HypermediaError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            HypermediaError::Parse(_) => StatusCode::BAD_REQUEST,
            HypermediaError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            HypermediaError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HypermediaError::TypeMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HypermediaError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HypermediaError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            HypermediaError::Parse(e) => e.error_code(),
            HypermediaError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
            HypermediaError::Operation { .. } => "OPERATION_FAILED",
            HypermediaError::TypeMismatch { .. } => "TYPE_MISMATCH",
            HypermediaError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl ParseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ParseError::Empty => "EMPTY_KEY",
            ParseError::TooManyParts { .. } => "TOO_MANY_PARTS",
            ParseError::BlankKey { .. } => "BLANK_KEY",
            ParseError::DuplicateKey { .. } => "DUPLICATE_KEY",
            ParseError::DuplicateIdKey { .. } => "DUPLICATE_KEY",
            ParseError::MultipleIdValues { .. } => "MULTIPLE_ID_VALUES",
        }
    }
}

impl IntoResponse for HypermediaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HypermediaError::invalid_argument("routeName", "blank").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HypermediaError::RouteNotFound {
                route_name: "Person".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HypermediaError::operation("routeName", "Person", "bad uri").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_error_is_bad_request() {
        let err: HypermediaError = ParseError::TooManyParts {
            segment: "a=b=c".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "TOO_MANY_PARTS");
    }

    #[test]
    fn test_operation_message_names_key_and_value() {
        let err =
            HypermediaError::operation("routeName", "Person", "Resolved URL is not a valid URI");
        let message = err.to_string();
        assert!(message.contains("routeName"));
        assert!(message.contains("Person"));
    }

    #[test]
    fn test_multiple_id_message_explains_aliasing() {
        let err = ParseError::MultipleIdValues {
            key: "id".to_string(),
            first: "Hello".to_string(),
            second: "Id2".to_string(),
        };
        assert!(err.to_string().contains("A value without a key is the value of 'id'"));
    }

    #[test]
    fn test_to_response() {
        let response = HypermediaError::RouteNotFound {
            route_name: "Person".to_string(),
        }
        .to_response();
        assert_eq!(response.code, "ROUTE_NOT_FOUND");
        assert_eq!(response.message, "Route 'Person' not found");
    }
}
