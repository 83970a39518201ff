//! Checks applied to webhook drafts before they reach the API.

use std::collections::BTreeMap;

use handlebars::Handlebars;

use super::{CustomPayload, WebhookError, WebhookEvent};
use crate::filter::string_in_slice;

/// Delivery methods the API accepts.
pub const METHODS: [&str; 4] = ["DELETE", "PATCH", "POST", "PUT"];

/// Custom payload type whose value is compiled before sending.
pub const HANDLEBARS_PAYLOAD_TYPE: &str = "text/x-handlebars-template";

/// The API rejects more than one notification.
pub const MAX_NOTIFICATIONS: usize = 1;

/// The API rejects more than ten filters.
pub const MAX_FILTERS: usize = 10;

/// Checks that `event` is a supported event name.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidEvent`] otherwise.
pub fn validate_event(event: &str) -> Result<(), WebhookError> {
    if string_in_slice(&WebhookEvent::names(), event) {
        Ok(())
    } else {
        Err(WebhookError::InvalidEvent(event.to_string()))
    }
}

/// Checks that `method` is an accepted delivery method.
///
/// Matching is exact: `post` is rejected.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidMethod`] otherwise.
pub fn validate_method(method: &str) -> Result<(), WebhookError> {
    if string_in_slice(&METHODS, method) {
        Ok(())
    } else {
        Err(WebhookError::InvalidMethod(method.to_string()))
    }
}

/// Builds a custom payload from its `type`/`value` map.
///
/// An empty map means no custom payload. Handlebars payloads must compile.
///
/// # Errors
///
/// - [`WebhookError::UnknownPayloadKey`] for keys other than `type` and `value`
/// - [`WebhookError::InvalidTemplate`] for a handlebars payload with a syntax error
pub fn custom_payload(
    fields: &BTreeMap<String, String>,
) -> Result<Option<CustomPayload>, WebhookError> {
    if let Some(key) = fields.keys().find(|k| *k != "type" && *k != "value") {
        return Err(WebhookError::UnknownPayloadKey(key.clone()));
    }
    if fields.is_empty() {
        return Ok(None);
    }

    let payload = CustomPayload {
        payload_type: fields.get("type").cloned().unwrap_or_default(),
        value: fields.get("value").cloned().unwrap_or_default(),
    };

    if payload.payload_type == HANDLEBARS_PAYLOAD_TYPE {
        let mut hbs = Handlebars::new();
        hbs.register_template_string("custom_payload", &payload.value)
            .map_err(|e| WebhookError::InvalidTemplate {
                reason: e.to_string(),
            })?;
    }

    Ok(Some(payload))
}
