//! Wire codec for a single webhook filter argument.
//!
//! The management API uses one `value` key with two shapes: a string for
//! `equal` filters and a string array for `in` filters. A `jsonPath` key
//! names the field being filtered. Exactly one shape appears per object:
//!
//! ```text
//! {"jsonPath": "<path>"}
//! {"value": "<scalar>"}
//! {"value": ["<a>", "<b>"]}
//! {}
//! ```

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use super::FilterError;

/// A decoded filter argument.
///
/// A variant with an empty payload (`PathOnly("")`, `EqualValue("")` or
/// `InValues([])`) carries nothing the wire can express. It encodes like
/// [`FilterArgument::Empty`] and compares equal to it, and decoding never
/// produces one.
#[derive(Debug, Clone)]
pub enum FilterArgument {
    /// `{"jsonPath": "..."}`
    PathOnly(String),
    /// `{"value": "..."}`
    EqualValue(String),
    /// `{"value": [...]}`
    InValues(Vec<String>),
    /// No recognized key populated.
    Empty,
}

/// Loosely typed argument as callers assemble it.
///
/// Any combination of fields may be set; [`encode`] resolves them by
/// priority and rejects the ambiguous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArg {
    /// Path of the filtered field
    pub json_path: Option<String>,
    /// Scalar value for `equal` filters
    pub eq_value: Option<String>,
    /// Value list for `in` filters
    pub in_values: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct PathProbe {
    #[serde(rename = "jsonPath", default)]
    json_path: Option<String>,
}

#[derive(Deserialize)]
struct ValueProbe {
    #[serde(default)]
    value: Option<serde_json::Value>,
}

#[derive(Serialize, PartialEq, Eq)]
#[serde(untagged)]
enum Wire<'a> {
    Path {
        #[serde(rename = "jsonPath")]
        json_path: &'a str,
    },
    Equal {
        value: &'a str,
    },
    In {
        value: &'a [String],
    },
}

/// Decodes one filter argument object.
///
/// A non-empty `jsonPath` wins over anything else in the object, and keys
/// other than `jsonPath` and `value` are ignored. Zero-length input decodes
/// to [`FilterArgument::Empty`], mirroring [`FilterArgument::encode`].
///
/// # Errors
///
/// - [`FilterError::Decode`] for malformed JSON or a duplicated `value` key
/// - [`FilterError::NotAnObject`] if the input is not a JSON object
/// - [`FilterError::UnsupportedValue`] if `value` is neither a string nor an
///   array of strings
pub fn decode(bytes: &[u8]) -> Result<FilterArgument, FilterError> {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        None => return Ok(FilterArgument::Empty),
        Some(b'{') => {}
        Some(_) => {
            // Still report syntax errors as such.
            serde_json::from_slice::<serde::de::IgnoredAny>(bytes).map_err(FilterError::Decode)?;
            return Err(FilterError::NotAnObject);
        }
    }

    let probe: PathProbe = serde_json::from_slice(bytes).map_err(FilterError::Decode)?;
    if let Some(path) = probe.json_path.filter(|p| !p.is_empty()) {
        return Ok(FilterArgument::PathOnly(path));
    }

    let probe: ValueProbe = serde_json::from_slice(bytes).map_err(FilterError::Decode)?;
    match probe.value {
        None => Ok(FilterArgument::Empty),
        Some(serde_json::Value::String(value)) if value.is_empty() => Ok(FilterArgument::Empty),
        Some(serde_json::Value::String(value)) => Ok(FilterArgument::EqualValue(value)),
        Some(array @ serde_json::Value::Array(_)) => {
            let values: Vec<String> =
                serde_json::from_value(array).map_err(FilterError::Decode)?;
            if values.is_empty() {
                Ok(FilterArgument::Empty)
            } else {
                Ok(FilterArgument::InValues(values))
            }
        }
        Some(other) => Err(FilterError::UnsupportedValue {
            kind: json_kind(&other),
        }),
    }
}

/// Encodes a loosely typed argument.
///
/// Priority is `json_path`, then `eq_value`, then `in_values`. With nothing
/// set, or only empty values set, the result is zero bytes, not `{}` or
/// `null`.
///
/// # Errors
///
/// Returns [`FilterError::Ambiguous`] if both `eq_value` and `in_values` are
/// set, regardless of `json_path`.
pub fn encode(raw: &RawArg) -> Result<Vec<u8>, FilterError> {
    FilterArgument::try_from(raw.clone()).map(|argument| argument.encode())
}

impl FilterArgument {
    /// Encodes this argument in its wire shape.
    ///
    /// [`FilterArgument::Empty`] encodes to zero bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        // Serializing borrowed strings into a Vec cannot fail.
        self.wire()
            .and_then(|wire| serde_json::to_vec(&wire).ok())
            .unwrap_or_default()
    }

    /// Returns true for [`FilterArgument::Empty`] and empty payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wire().is_none()
    }

    /// Wire shape of this argument; `None` when nothing would be written.
    fn wire(&self) -> Option<Wire<'_>> {
        match self {
            Self::PathOnly(json_path) if !json_path.is_empty() => Some(Wire::Path { json_path }),
            Self::EqualValue(value) if !value.is_empty() => Some(Wire::Equal { value }),
            Self::InValues(value) if !value.is_empty() => Some(Wire::In { value }),
            Self::PathOnly(_) | Self::EqualValue(_) | Self::InValues(_) | Self::Empty => None,
        }
    }
}

impl PartialEq for FilterArgument {
    fn eq(&self, other: &Self) -> bool {
        self.wire() == other.wire()
    }
}

impl Eq for FilterArgument {}

impl TryFrom<RawArg> for FilterArgument {
    type Error = FilterError;

    fn try_from(raw: RawArg) -> Result<Self, Self::Error> {
        match raw {
            RawArg {
                eq_value: Some(_),
                in_values: Some(_),
                ..
            } => Err(FilterError::Ambiguous),
            RawArg {
                json_path: Some(path),
                ..
            } if !path.is_empty() => Ok(Self::PathOnly(path)),
            RawArg {
                eq_value: Some(value),
                ..
            } => Ok(Self::EqualValue(value)),
            RawArg {
                in_values: Some(values),
                ..
            } => Ok(Self::InValues(values)),
            RawArg { .. } => Ok(Self::Empty),
        }
    }
}

impl From<FilterArgument> for RawArg {
    fn from(argument: FilterArgument) -> Self {
        match argument {
            FilterArgument::PathOnly(path) => Self {
                json_path: Some(path),
                ..Self::default()
            },
            FilterArgument::EqualValue(value) => Self {
                eq_value: Some(value),
                ..Self::default()
            },
            FilterArgument::InValues(values) => Self {
                in_values: Some(values),
                ..Self::default()
            },
            FilterArgument::Empty => Self::default(),
        }
    }
}

impl Serialize for FilterArgument {
    /// Inside a larger document an empty argument is written as `{}`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.wire() {
            Some(wire) => wire.serialize(serializer),
            None => serde_json::Map::new().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterArgument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode(raw.get().as_bytes()).map_err(D::Error::custom)
    }
}

impl Serialize for RawArg {
    /// Fails on the ambiguous combination instead of picking one value.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FilterArgument::try_from(self.clone())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
