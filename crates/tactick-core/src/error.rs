use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by the client.
///
/// The variants correspond to the four failure classes a caller may want to
/// branch on: local precondition failures, API-level rejections, rate
/// limiting, and transport/decode problems. The library never retries and
/// never sleeps; a 429 carries the server's `Retry-After` hint so the caller
/// can implement its own backoff.
#[derive(Debug, Error)]
pub enum Error {
    /// A required builder field was missing or a request precondition failed.
    /// Raised before any network traffic.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The API answered with a non-success status other than 429.
    #[error("api error [{status}]: {message}")]
    Api {
        status: u16,
        message: String,
        /// Structured error body, when the server sent a JSON object.
        body: Option<Map<String, Value>>,
    },

    /// The API answered 429.
    #[error("rate limited: {message} (retry after {}s)", .retry_after.as_secs())]
    RateLimited {
        message: String,
        /// Parsed from the `Retry-After` header; zero when absent or unparseable.
        retry_after: Duration,
        body: Option<Map<String, Value>>,
    },

    /// The request never produced a usable HTTP response.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this is a 429 rate-limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The server's retry hint, for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// The HTTP status code, for responses that reached the API.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_helpers_expose_status_and_hint() {
        let error = Error::RateLimited {
            message: String::from("too many requests"),
            retry_after: Duration::from_secs(30),
            body: None,
        };

        assert!(error.is_rate_limited());
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(error.status(), Some(429));
    }

    #[test]
    fn api_error_formats_status_and_message() {
        let error = Error::Api {
            status: 500,
            message: String::from("internal error"),
            body: None,
        };

        assert_eq!(error.to_string(), "api error [500]: internal error");
        assert_eq!(error.status(), Some(500));
        assert!(!error.is_rate_limited());
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn invalid_argument_carries_no_status() {
        let error = Error::invalid_argument("exchange is required");
        assert_eq!(error.to_string(), "invalid argument: exchange is required");
        assert_eq!(error.status(), None);
    }
}
