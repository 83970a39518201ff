//! Tests for `WebhookState` conversion.

use super::{HeaderState, NotificationState, Webhook, WebhookError, WebhookState};
use crate::filter::{FilterArgumentState, FilterState, FilterType};

fn valid_state() -> WebhookState {
    WebhookState {
        label: "Publish hook".into(),
        events: vec!["dynamic-content.snapshot.published".into()],
        handlers: vec!["https://example.com/hook".into()],
        active: true,
        notifications: vec![NotificationState {
            email: "ops@example.com".into(),
        }],
        secret: Some("shh".into()),
        headers: vec![HeaderState {
            key: "X-Plain".into(),
            value: Some("v".into()),
            secret_value: None,
        }],
        filters: vec![FilterState {
            filter_type: FilterType::In,
            arguments: vec![FilterArgumentState {
                json_path: "$.payload.id".into(),
                value: vec!["a".into(), "b".into()],
            }],
        }],
        method: "POST".into(),
        custom_payload: [("type", "application/json"), ("value", "{}")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

mod to_draft {
    use super::*;

    #[test]
    fn valid_state_builds_draft() {
        let draft = valid_state().to_draft().unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.label, "Publish hook");
        assert_eq!(draft.notifications.as_ref().map(Vec::len), Some(1));
        assert_eq!(draft.headers.as_ref().unwrap()[0].value, "v");
        assert!(!draft.headers.as_ref().unwrap()[0].secret);
        assert_eq!(draft.filters.len(), 1);
        assert_eq!(draft.custom_payload.unwrap().payload_type, "application/json");
    }

    #[test]
    fn secret_value_wins_and_marks_header_secret() {
        let mut state = valid_state();
        state.headers = vec![HeaderState {
            key: "X-Key".into(),
            value: Some("plain".into()),
            secret_value: Some("hidden".into()),
        }];

        let headers = state.to_draft().unwrap().headers.unwrap();

        assert_eq!(headers[0].value, "hidden");
        assert!(headers[0].secret);
    }

    #[test]
    fn header_without_value_is_rejected() {
        let mut state = valid_state();
        state.headers = vec![HeaderState {
            key: "X-Empty".into(),
            ..HeaderState::default()
        }];

        assert!(matches!(
            state.to_draft(),
            Err(WebhookError::HeaderWithoutValue { ref key }) if key == "X-Empty"
        ));
    }

    #[test]
    fn empty_label_is_rejected() {
        let mut state = valid_state();
        state.label.clear();

        assert!(matches!(state.to_draft(), Err(WebhookError::EmptyLabel)));
    }

    #[test]
    fn unknown_event_is_rejected() {
        let mut state = valid_state();
        state.events.push("dynamic-content.unknown".into());

        assert!(matches!(state.to_draft(), Err(WebhookError::InvalidEvent(_))));
    }

    #[test]
    fn invalid_method_is_rejected() {
        let mut state = valid_state();
        state.method = "GET".into();

        assert!(matches!(state.to_draft(), Err(WebhookError::InvalidMethod(_))));
    }

    #[test]
    fn second_notification_is_rejected() {
        let mut state = valid_state();
        state.notifications.push(NotificationState {
            email: "dev@example.com".into(),
        });

        assert!(matches!(
            state.to_draft(),
            Err(WebhookError::TooManyNotifications { count: 2, max: 1 })
        ));
    }

    #[test]
    fn eleven_filters_are_rejected() {
        let mut state = valid_state();
        let filter = state.filters[0].clone();
        state.filters = vec![filter; 11];

        assert!(matches!(
            state.to_draft(),
            Err(WebhookError::TooManyFilters { count: 11, max: 10 })
        ));
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let mut state = valid_state();
        state.filters[0].filter_type = FilterType::Equal;

        assert!(matches!(state.to_draft(), Err(WebhookError::Filter(_))));
    }

    #[test]
    fn empty_secret_is_omitted() {
        let mut state = valid_state();
        state.secret = Some(String::new());

        assert_eq!(state.to_draft().unwrap().secret, None);
    }
}

mod refresh {
    use super::*;

    #[test]
    fn refresh_keeps_headers_and_notifications() {
        let mut state = valid_state();
        let mut remote: Webhook = state.to_draft().unwrap();
        remote.label = "Renamed".into();
        remote.headers = None;
        remote.notifications = None;
        remote.custom_payload = None;

        state.refresh_from(&remote).unwrap();

        assert_eq!(state.label, "Renamed");
        assert_eq!(state.headers.len(), 1);
        assert_eq!(state.notifications.len(), 1);
        assert!(state.custom_payload.is_empty());
    }

    #[test]
    fn refresh_round_trips_filters() {
        let original = valid_state();
        let remote = original.to_draft().unwrap();
        let mut state = WebhookState::default();

        state.refresh_from(&remote).unwrap();

        assert_eq!(state.filters, original.filters);
        assert_eq!(state.custom_payload, original.custom_payload);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn parses_json_definition() {
        let state: WebhookState = serde_json::from_str(
            r#"{
                "label": "hook",
                "method": "POST",
                "filters": [{"type": "equal", "arguments": [{"json_path": "$.id", "value": ["x"]}]}]
            }"#,
        )
        .unwrap();

        assert_eq!(state.filters[0].filter_type, FilterType::Equal);
        assert!(state.to_draft().is_ok());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: Result<WebhookState, _> =
            serde_json::from_str(r#"{"label": "hook", "method": "POST", "colour": "red"}"#);

        assert!(result.is_err());
    }
}
