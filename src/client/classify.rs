//! Classification of management API responses.
//!
//! See <https://amplience.com/docs/api/dynamic-content/management/index.html#section/Usage/Status-Code-Table>.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ClientError, HttpResponse};

/// Error body returned by the management API for failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Individual errors, in the order the API reported them
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

/// A single entry of an [`ErrorResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorItem {
    /// Severity, e.g. `"ERROR"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Machine-readable error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Path of the offending property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Reference to the offending entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// The rejected value, in whatever JSON shape the API echoed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<serde_json::Value>,
}

impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.level.as_deref().unwrap_or("UNKNOWN"),
            self.code.as_deref().unwrap_or("-"),
            self.message.as_deref().unwrap_or(""),
        )?;
        if let Some(property) = &self.property {
            write!(f, " (property: {property})")?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {entity})")?;
        }
        match &self.invalid_value {
            Some(serde_json::Value::String(value)) => write!(f, " (invalid value: {value})"),
            Some(value) => write!(f, " (invalid value: {value})"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no error details");
        }
        for (i, item) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "  - {item}")?;
        }
        Ok(())
    }
}

/// A failed API exchange, ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// Status of the response, absent when there was no response at all
    pub status: Option<http::StatusCode>,
    /// Formatted description including any API error items
    pub message: String,
}

impl ApiFailure {
    fn without_response() -> Self {
        Self {
            status: None,
            message: "nil response".to_string(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of classifying a single API response.
///
/// Exactly one variant applies to every response.
#[derive(Debug)]
pub enum Outcome {
    /// 200, 201, 202 or 204; the untouched response is handed back.
    Ok(HttpResponse),
    /// A transient server failure (500). Callers may retry.
    Retryable(ApiFailure),
    /// Anything else. The request must change before it can succeed.
    Fatal(ApiFailure),
}

impl Outcome {
    /// Returns true for [`Outcome::Retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

/// Classifies a response into success, retryable failure or fatal failure.
///
/// The response is consumed. Success bodies are not inspected; failure
/// bodies must parse as an [`ErrorResponse`], otherwise the outcome is
/// [`Outcome::Fatal`] regardless of status. Only 500 is treated as
/// transient: other non-2xx codes mean the request itself is wrong.
#[must_use]
pub fn classify(response: Option<HttpResponse>) -> Outcome {
    let Some(response) = response else {
        return Outcome::Fatal(ApiFailure::without_response());
    };

    match response.status.as_u16() {
        200 | 201 | 202 | 204 => Outcome::Ok(response),
        500 => match describe_failure(&response, "retryable") {
            Ok(failure) => Outcome::Retryable(failure),
            Err(failure) => Outcome::Fatal(failure),
        },
        _ => match describe_failure(&response, "non retryable") {
            Ok(failure) | Err(failure) => Outcome::Fatal(failure),
        },
    }
}

/// Parses the error body of `response` into a failure description.
///
/// Returns `Err` with a description of the parse problem when the body is not
/// an [`ErrorResponse`].
fn describe_failure(response: &HttpResponse, kind: &str) -> Result<ApiFailure, ApiFailure> {
    let status = response.status;
    match serde_json::from_slice::<ErrorResponse>(&response.body) {
        Ok(errors) => Ok(ApiFailure {
            status: Some(status),
            message: format!(
                "{kind} error with code {} received: {}\n Amplience Error Response:\n{errors}",
                status.as_u16(),
                response.status_text(),
            ),
        }),
        Err(e) => Err(ApiFailure {
            status: Some(status),
            message: format!(
                "could not parse error response with code {} ({}): {e}",
                status.as_u16(),
                response.status_text(),
            ),
        }),
    }
}

/// Decodes a success response body into `T`.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] if the body is not valid JSON for `T`.
pub fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(ClientError::Decode)
}
