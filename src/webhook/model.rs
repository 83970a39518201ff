//! Webhook resource as exchanged with the management API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::WebhookError;
use crate::filter::WebhookFilter;

/// Content events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    /// A content item was assigned to a user.
    ContentItemAssigned,
    /// A content item was created.
    ContentItemCreated,
    /// A content item was updated.
    ContentItemUpdated,
    /// A content item moved to another workflow state.
    ContentItemWorkflowUpdated,
    /// An edition was published.
    EditionPublished,
    /// An edition was scheduled.
    EditionScheduled,
    /// An edition was unscheduled.
    EditionUnscheduled,
    /// A snapshot was published.
    SnapshotPublished,
}

impl WebhookEvent {
    /// Every supported event.
    pub const ALL: [Self; 8] = [
        Self::ContentItemAssigned,
        Self::ContentItemCreated,
        Self::ContentItemUpdated,
        Self::ContentItemWorkflowUpdated,
        Self::EditionPublished,
        Self::EditionScheduled,
        Self::EditionUnscheduled,
        Self::SnapshotPublished,
    ];

    /// Returns the wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentItemAssigned => "dynamic-content.content-item.assigned",
            Self::ContentItemCreated => "dynamic-content.content-item.created",
            Self::ContentItemUpdated => "dynamic-content.content-item.updated",
            Self::ContentItemWorkflowUpdated => "dynamic-content.content-item.workflow.updated",
            Self::EditionPublished => "dynamic-content.edition.published",
            Self::EditionScheduled => "dynamic-content.edition.scheduled",
            Self::EditionUnscheduled => "dynamic-content.edition.unscheduled",
            Self::SnapshotPublished => "dynamic-content.snapshot.published",
        }
    }

    /// Returns the wire names of every supported event.
    #[must_use]
    pub fn names() -> [&'static str; 8] {
        Self::ALL.map(Self::as_str)
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEvent {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| WebhookError::InvalidEvent(s.to_string()))
    }
}

/// Email notification target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient address
    pub email: String,
}

/// Extra header sent with every webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHeader {
    /// Header name
    pub key: String,
    /// Header value; masked by the API when `secret` is set
    pub value: String,
    /// Whether the value is write-only
    #[serde(default)]
    pub secret: bool,
}

/// Replacement for the default delivery body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPayload {
    /// Media type of the template, e.g. `text/x-handlebars-template`
    #[serde(rename = "type")]
    pub payload_type: String,
    /// Template source
    pub value: String,
}

/// A webhook as the management API represents it.
///
/// Used both as the request body (draft) and the response. `None` for
/// `notifications` or `headers` leaves them out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Server-assigned ID, absent on drafts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub label: String,
    /// Subscribed event names
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<String>,
    /// Delivery URLs
    #[serde(default, deserialize_with = "null_as_default")]
    pub handlers: Vec<String>,
    /// Whether deliveries are sent
    #[serde(default)]
    pub active: bool,
    /// Failure notification targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
    /// Signing secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Creation timestamp (RFC 3339), read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    /// Last modification timestamp (RFC 3339), read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    /// Extra delivery headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<WebhookHeader>>,
    /// Delivery filters
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub filters: Vec<WebhookFilter>,
    /// Delivery HTTP method
    pub method: String,
    /// Custom delivery body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<CustomPayload>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
