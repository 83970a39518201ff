//! Tests for the webhook wire model.

use super::{Webhook, WebhookError, WebhookEvent};
use crate::filter::{FilterArgument, FilterType};

const API_RESPONSE: &str = r#"{
    "id": "5a497a000000000000000000",
    "label": "Publish hook",
    "events": ["dynamic-content.snapshot.published"],
    "handlers": ["https://example.com/hook"],
    "active": true,
    "notifications": null,
    "secret": "shh",
    "createdDate": "2021-06-01T10:00:00.000Z",
    "lastModifiedDate": "2021-06-02T10:00:00.000Z",
    "headers": [{"key": "X-Key", "value": "*****", "secret": true}],
    "filters": [
        {"type": "equal", "arguments": [{"jsonPath": "$.payload.id"}, {"value": "abc"}]}
    ],
    "method": "POST",
    "customPayload": {"type": "text/x-handlebars-template", "value": "{{payload.id}}"}
}"#;

mod events {
    use super::*;

    #[test]
    fn all_events_round_trip_through_names() {
        for event in WebhookEvent::ALL {
            assert_eq!(event.as_str().parse::<WebhookEvent>().unwrap(), event);
        }
    }

    #[test]
    fn names_cover_every_event() {
        let names = WebhookEvent::names();

        assert_eq!(names.len(), 8);
        assert!(names.contains(&"dynamic-content.content-item.workflow.updated"));
    }

    #[test]
    fn unknown_event_is_rejected() {
        let err = "dynamic-content.nope".parse::<WebhookEvent>().unwrap_err();

        assert!(matches!(err, WebhookError::InvalidEvent(ref e) if e == "dynamic-content.nope"));
    }
}

mod wire {
    use super::*;

    #[test]
    fn decodes_api_response() {
        let webhook: Webhook = serde_json::from_str(API_RESPONSE).unwrap();

        assert_eq!(webhook.id.as_deref(), Some("5a497a000000000000000000"));
        assert!(webhook.active);
        assert_eq!(webhook.notifications, None);
        assert_eq!(webhook.headers.as_ref().map(Vec::len), Some(1));
        assert_eq!(webhook.filters[0].filter_type, FilterType::Equal);
        assert_eq!(
            webhook.filters[0].arguments[1],
            FilterArgument::EqualValue("abc".into())
        );
        assert_eq!(
            webhook.custom_payload.unwrap().payload_type,
            "text/x-handlebars-template"
        );
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let webhook: Webhook = serde_json::from_str(
            r#"{"label": "x", "events": null, "handlers": null, "filters": null, "method": "POST"}"#,
        )
        .unwrap();

        assert!(webhook.events.is_empty());
        assert!(webhook.handlers.is_empty());
        assert!(webhook.filters.is_empty());
    }

    #[test]
    fn draft_omits_unset_fields() {
        let webhook: Webhook =
            serde_json::from_str(r#"{"label": "x", "method": "PUT"}"#).unwrap();

        let json: serde_json::Value = serde_json::to_value(&webhook).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "label": "x",
                "events": [],
                "handlers": [],
                "active": false,
                "method": "PUT"
            })
        );
    }

    #[test]
    fn uses_camel_case_keys() {
        let webhook: Webhook = serde_json::from_str(API_RESPONSE).unwrap();

        let json = serde_json::to_string(&webhook).unwrap();

        assert!(json.contains("\"createdDate\""));
        assert!(json.contains("\"customPayload\""));
        assert!(!json.contains("created_date"));
    }
}
