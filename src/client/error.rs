//! Error types for the management API client.

use thiserror::Error;

use super::ApiFailure;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for OAuth2 token acquisition.
///
/// Authentication failures are never retried automatically.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request could not be sent or its response not received.
    #[error("Token request failed: {0}")]
    Transport(#[from] HttpError),

    /// The token endpoint answered with a status other than 200.
    #[error("Token endpoint returned status {status}")]
    Status {
        /// Status code returned by the token endpoint
        status: http::StatusCode,
    },

    /// The token endpoint answered 200 with a body that is not a token response.
    #[error("Could not decode token response: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The token endpoint answered 200 without an access token.
    #[error("No token issued")]
    NoToken,

    /// The issued token cannot be carried in an `Authorization` header.
    #[error("Issued token is not a valid header value")]
    MalformedToken,
}

/// Error type for requests against the management API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The main request failed at the transport level.
    #[error("Transport error: {0}")]
    Transport(#[source] HttpError),

    /// No bearer token could be obtained, so the request was not sent.
    #[error("Could not get OAuth token for request: {0}")]
    Auth(#[from] AuthError),

    /// The request method is not one of GET, POST, PATCH, DELETE.
    #[error("Unsupported Amplience request method {0}")]
    UnsupportedMethod(http::Method),

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The API answered with a non-retryable failure.
    #[error("{0}")]
    Api(ApiFailure),

    /// The API kept answering with retryable failures until the deadline.
    #[error("Giving up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The last retryable failure observed
        last_error: String,
    },

    /// A success response body could not be decoded.
    #[error("Could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns the HTTP status of an API failure, if this is one.
    #[must_use]
    pub const fn api_status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api(failure) => failure.status,
            _ => None,
        }
    }
}
