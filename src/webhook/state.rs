//! Flat, user-facing description of a webhook.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::validation::{
    MAX_FILTERS, MAX_NOTIFICATIONS, custom_payload, validate_event, validate_method,
};
use super::{Notification, Webhook, WebhookError, WebhookHeader};
use crate::filter::FilterState;

/// A delivery header in flat form.
///
/// Exactly one of `value` and `secret_value` should be set; a non-empty
/// `secret_value` wins and marks the header secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderState {
    /// Header name
    pub key: String,
    /// Plain value
    #[serde(default)]
    pub value: Option<String>,
    /// Write-only value
    #[serde(default)]
    pub secret_value: Option<String>,
}

/// A notification target in flat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationState {
    /// Recipient address
    pub email: String,
}

/// Desired state of a webhook, as written in a definition file.
///
/// Converted into an API draft with [`WebhookState::to_draft`] and refreshed
/// from API responses with [`WebhookState::refresh_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookState {
    /// Display name
    pub label: String,
    /// Subscribed event names
    #[serde(default)]
    pub events: Vec<String>,
    /// Delivery URLs
    #[serde(default)]
    pub handlers: Vec<String>,
    /// Whether deliveries are sent
    #[serde(default)]
    pub active: bool,
    /// At most one notification target
    #[serde(default)]
    pub notifications: Vec<NotificationState>,
    /// Signing secret
    #[serde(default)]
    pub secret: Option<String>,
    /// Extra delivery headers
    #[serde(default)]
    pub headers: Vec<HeaderState>,
    /// Up to ten filters
    #[serde(default)]
    pub filters: Vec<FilterState>,
    /// Delivery method: DELETE, PATCH, POST or PUT
    pub method: String,
    /// `type` and `value` of a custom delivery body
    #[serde(default)]
    pub custom_payload: BTreeMap<String, String>,
}

impl WebhookState {
    /// Validates this state and builds the API draft.
    ///
    /// # Errors
    ///
    /// Returns the first [`WebhookError`] found: empty label, unknown event,
    /// invalid method, too many notifications or filters, a header without
    /// value, a malformed filter, or an invalid custom payload.
    pub fn to_draft(&self) -> Result<Webhook, WebhookError> {
        if self.label.is_empty() {
            return Err(WebhookError::EmptyLabel);
        }
        for event in &self.events {
            validate_event(event)?;
        }
        validate_method(&self.method)?;

        if self.notifications.len() > MAX_NOTIFICATIONS {
            return Err(WebhookError::TooManyNotifications {
                count: self.notifications.len(),
                max: MAX_NOTIFICATIONS,
            });
        }
        if self.filters.len() > MAX_FILTERS {
            return Err(WebhookError::TooManyFilters {
                count: self.filters.len(),
                max: MAX_FILTERS,
            });
        }

        let headers = self
            .headers
            .iter()
            .map(HeaderState::to_header)
            .collect::<Result<Vec<_>, _>>()?;
        let filters = self
            .filters
            .iter()
            .map(FilterState::expand)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Webhook {
            id: None,
            label: self.label.clone(),
            events: self.events.clone(),
            handlers: self.handlers.clone(),
            active: self.active,
            notifications: Some(
                self.notifications
                    .iter()
                    .map(|n| Notification {
                        email: n.email.clone(),
                    })
                    .collect(),
            ),
            secret: self.secret.clone().filter(|s| !s.is_empty()),
            created_date: None,
            last_modified_date: None,
            headers: Some(headers),
            filters,
            method: self.method.clone(),
            custom_payload: custom_payload(&self.custom_payload)?,
        })
    }

    /// Copies the server's view of `remote` into this state.
    ///
    /// Headers and notifications are left alone: the API may echo them as
    /// null or masked, which would read as a spurious change.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Filter`] if a remote filter cannot be flattened.
    pub fn refresh_from(&mut self, remote: &Webhook) -> Result<(), WebhookError> {
        let filters = remote
            .filters
            .iter()
            .map(crate::filter::WebhookFilter::flatten)
            .collect::<Result<Vec<_>, _>>()?;

        self.label.clone_from(&remote.label);
        self.events.clone_from(&remote.events);
        self.handlers.clone_from(&remote.handlers);
        self.active = remote.active;
        self.secret.clone_from(&remote.secret);
        self.filters = filters;
        self.method.clone_from(&remote.method);
        self.custom_payload = remote
            .custom_payload
            .as_ref()
            .map(|p| {
                BTreeMap::from([
                    ("type".to_string(), p.payload_type.clone()),
                    ("value".to_string(), p.value.clone()),
                ])
            })
            .unwrap_or_default();
        Ok(())
    }
}

impl HeaderState {
    fn to_header(&self) -> Result<WebhookHeader, WebhookError> {
        if let Some(secret) = self.secret_value.as_ref().filter(|s| !s.is_empty()) {
            return Ok(WebhookHeader {
                key: self.key.clone(),
                value: secret.clone(),
                secret: true,
            });
        }
        match self.value.as_ref().filter(|v| !v.is_empty()) {
            Some(value) => Ok(WebhookHeader {
                key: self.key.clone(),
                value: value.clone(),
                secret: false,
            }),
            None => Err(WebhookError::HeaderWithoutValue {
                key: self.key.clone(),
            }),
        }
    }
}
