//! Client error taxonomy.
//!
//! Every failed backend call is turned into an [`ApiError`] exactly once, in
//! the HTTP wrapper, and handed back to the caller. [`ErrorClass`] is the
//! coarse classification reported on the diagnostic channel.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Diagnostic classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// 401: the session was rejected by the backend.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 500.
    ServerError,
    /// Any other non-success status.
    Unclassified,
    /// No response was received.
    NetworkFailure,
    /// A success response whose body could not be decoded.
    InvalidResponse,
    /// The request could not be built locally.
    InvalidRequest,
}

impl ErrorClass {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }

    /// Stable code for log fields and CLI output.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unauthorized => "E_UNAUTHORIZED",
            Self::Forbidden => "E_FORBIDDEN",
            Self::NotFound => "E_NOT_FOUND",
            Self::ServerError => "E_SERVER_ERROR",
            Self::Unclassified => "E_UNCLASSIFIED",
            Self::NetworkFailure => "E_NETWORK",
            Self::InvalidResponse => "E_INVALID_RESPONSE",
            Self::InvalidRequest => "E_INVALID_REQUEST",
        }
    }

    /// Human-readable summary used as the diagnostic message.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Unauthorized => "session rejected",
            Self::Forbidden => "access forbidden",
            Self::NotFound => "resource not found",
            Self::ServerError => "server error",
            Self::Unclassified => "an error occurred",
            Self::NetworkFailure => "network error",
            Self::InvalidResponse => "invalid response body",
            Self::InvalidRequest => "invalid request",
        }
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Errors returned by every backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401. The session has already been invalidated.
    #[error("unauthorized: {}", message_or(.message, "session rejected"))]
    Unauthorized { message: Option<String> },

    /// The backend answered 403.
    #[error("forbidden: {}", message_or(.message, "access forbidden"))]
    Forbidden { message: Option<String> },

    /// The backend answered 404.
    #[error("not found: {}", message_or(.message, "resource not found"))]
    NotFound { message: Option<String> },

    /// The backend answered 500.
    #[error("server error: {}", message_or(.message, "internal error"))]
    ServerError { message: Option<String> },

    /// The backend answered with any other non-success status.
    #[error("request failed with status {status}: {}", message_or(.message, "no detail"))]
    Status { status: u16, message: Option<String> },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A success response could not be decoded into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build the error for a non-success response, lifting the backend's
    /// `{ "message": ... }` body when there is one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        match ErrorClass::from_status(status) {
            ErrorClass::Unauthorized => Self::Unauthorized { message },
            ErrorClass::Forbidden => Self::Forbidden { message },
            ErrorClass::NotFound => Self::NotFound { message },
            ErrorClass::ServerError => Self::ServerError { message },
            _ => Self::Status { status, message },
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Unauthorized { .. } => ErrorClass::Unauthorized,
            Self::Forbidden { .. } => ErrorClass::Forbidden,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::ServerError { .. } => ErrorClass::ServerError,
            Self::Status { .. } => ErrorClass::Unclassified,
            Self::Network(_) => ErrorClass::NetworkFailure,
            Self::Decode(_) => ErrorClass::InvalidResponse,
            Self::Encode(_) | Self::HttpClientBuild(_) => ErrorClass::InvalidRequest,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.class().code()
    }

    /// HTTP status that produced this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::ServerError { .. } => Some(500),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn message_or<'a>(message: &'a Option<String>, fallback: &'a str) -> &'a str {
    message.as_deref().unwrap_or(fallback)
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

/// Errors produced while reading [`crate::ClientConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// A variable was set to an empty string where a value is required.
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
