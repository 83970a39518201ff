//! Error types for webhook filter handling.

use thiserror::Error;

use super::FilterType;

/// Error type for filter argument decoding, encoding and conversion.
///
/// All variants are fatal: a malformed or ambiguous argument cannot become
/// valid by retrying.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The input is not valid JSON, or has a duplicated key.
    #[error("Could not decode filter argument: {0}")]
    Decode(#[source] serde_json::Error),

    /// The input is valid JSON but not an object.
    #[error("Filter argument must be a JSON object")]
    NotAnObject,

    /// The `value` key holds something other than a string or string array.
    #[error("Filter argument value must be a string or an array of strings, got {kind}")]
    UnsupportedValue {
        /// JSON type found under `value`
        kind: &'static str,
    },

    /// Both a scalar and an array value are set.
    #[error("Ambiguous filter argument: both InValues and EqualValue set")]
    Ambiguous,

    /// A filter type other than `equal` or `in`.
    #[error("Invalid filter argument type {0}")]
    UnknownType(String),

    /// A filter whose arguments do not fit its type.
    #[error("Malformed {filter_type} filter: {reason}")]
    Malformed {
        /// Type of the offending filter
        filter_type: FilterType,
        /// What is wrong with the arguments
        reason: String,
    },
}

impl FilterError {
    pub(crate) fn malformed(filter_type: FilterType, reason: impl Into<String>) -> Self {
        Self::Malformed {
            filter_type,
            reason: reason.into(),
        }
    }
}
