//! Webhook filters and their flat, user-facing form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FilterArgument, FilterError};

/// Kind of webhook filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Field must equal one value.
    Equal,
    /// Field must be one of several values.
    In,
}

impl FilterType {
    /// Returns the wire name of the filter type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::In => "in",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "in" => Ok(Self::In),
            other => Err(FilterError::UnknownType(other.to_string())),
        }
    }
}

/// A filter as the management API sends and receives it.
///
/// The path and the value travel as two separate argument objects:
/// `{"type": "equal", "arguments": [{"jsonPath": "..."}, {"value": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookFilter {
    /// Filter kind
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// Encoded arguments in wire order
    pub arguments: Vec<FilterArgument>,
}

/// Path and values of a filter in flat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterArgumentState {
    /// Path of the filtered field
    pub json_path: String,
    /// Accepted values; exactly one for `equal` filters
    pub value: Vec<String>,
}

/// A filter in flat form, as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterState {
    /// Filter kind
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// At most one argument
    #[serde(default)]
    pub arguments: Vec<FilterArgumentState>,
}

impl FilterState {
    /// Expands the flat form into wire arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Malformed`] unless there is exactly one
    /// argument with a non-empty path, and exactly one value for `equal`
    /// or at least one value for `in`.
    pub fn expand(&self) -> Result<WebhookFilter, FilterError> {
        let [argument] = self.arguments.as_slice() else {
            return Err(FilterError::malformed(
                self.filter_type,
                format!("expected 1 argument, got {}", self.arguments.len()),
            ));
        };
        if argument.json_path.is_empty() {
            return Err(FilterError::malformed(self.filter_type, "json_path is empty"));
        }

        let value = match (self.filter_type, argument.value.as_slice()) {
            (FilterType::Equal, [value]) => FilterArgument::EqualValue(value.clone()),
            (FilterType::Equal, values) => {
                return Err(FilterError::malformed(
                    self.filter_type,
                    format!("expected 1 value, got {}", values.len()),
                ));
            }
            (FilterType::In, []) => {
                return Err(FilterError::malformed(self.filter_type, "no values"));
            }
            (FilterType::In, values) => FilterArgument::InValues(values.to_vec()),
        };

        Ok(WebhookFilter {
            filter_type: self.filter_type,
            arguments: vec![FilterArgument::PathOnly(argument.json_path.clone()), value],
        })
    }
}

impl WebhookFilter {
    /// Collapses wire arguments into the flat form.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Malformed`] unless the arguments are a path
    /// followed by a value of the shape the filter type requires.
    pub fn flatten(&self) -> Result<FilterState, FilterError> {
        let (json_path, value) = match (self.filter_type, self.arguments.as_slice()) {
            (
                FilterType::Equal,
                [FilterArgument::PathOnly(path), FilterArgument::EqualValue(value)],
            ) => (path, vec![value.clone()]),
            (FilterType::In, [FilterArgument::PathOnly(path), FilterArgument::InValues(values)]) => {
                (path, values.clone())
            }
            (filter_type, arguments) => {
                return Err(FilterError::malformed(
                    filter_type,
                    format!("unexpected arguments {arguments:?}"),
                ));
            }
        };

        Ok(FilterState {
            filter_type: self.filter_type,
            arguments: vec![FilterArgumentState {
                json_path: json_path.clone(),
                value,
            }],
        })
    }
}
