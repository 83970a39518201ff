//! Error types for webhook management.

use thiserror::Error;

use crate::client::ClientError;
use crate::filter::FilterError;

/// Error type for webhook validation and API operations.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// An event name outside the supported set.
    #[error("Invalid event type {0}")]
    InvalidEvent(String),

    /// A method other than DELETE, PATCH, POST or PUT.
    #[error("Invalid webhook method {0}, expected one of DELETE, PATCH, POST, PUT")]
    InvalidMethod(String),

    /// The label is empty.
    #[error("Webhook label must not be empty")]
    EmptyLabel,

    /// More notifications than the API accepts.
    #[error("Cannot exceed the maximum of {max} notification(s), got {count}")]
    TooManyNotifications {
        /// Number of notifications given
        count: usize,
        /// Maximum the API accepts
        max: usize,
    },

    /// More filters than the API accepts.
    #[error("Cannot exceed the maximum of {max} filters, got {count}")]
    TooManyFilters {
        /// Number of filters given
        count: usize,
        /// Maximum the API accepts
        max: usize,
    },

    /// A header with neither `value` nor `secret_value`.
    #[error("Header '{key}' does not have a value defined. Specify either value or secret_value")]
    HeaderWithoutValue {
        /// Header name
        key: String,
    },

    /// A custom payload key other than `type` and `value`.
    #[error("Unknown key {0} in custom payload field")]
    UnknownPayloadKey(String),

    /// A handlebars custom payload that does not compile.
    #[error("Invalid custom payload template: {reason}")]
    InvalidTemplate {
        /// Description of the syntax error
        reason: String,
    },

    /// A filter could not be converted.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The webhook could not be serialized for a request.
    #[error("Could not encode webhook: {0}")]
    Encode(#[source] serde_json::Error),

    /// The API rejected or failed the request.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A delete answered with a success code other than 204.
    #[error("Received unexpected status code {0}")]
    UnexpectedStatus(http::StatusCode),
}
