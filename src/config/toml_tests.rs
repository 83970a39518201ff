//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_auth_section() {
        let toml = r#"
            [auth]
            client_id = "id"
            client_secret = "secret"
            url = "https://auth.example.com/oauth/token"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.auth.client_id.as_deref(), Some("id"));
        assert_eq!(config.auth.client_secret.as_deref(), Some("secret"));
        assert_eq!(
            config.auth.url.as_deref(),
            Some("https://auth.example.com/oauth/token")
        );
    }

    #[test]
    fn parse_api_section() {
        let toml = r#"
            [api]
            url = "https://api.example.com/v2/content"
            hub_id = "hub1"
            user_agent = "tool/1.0"
            request_timeout = 10
            cache_token = true
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let api = &config.api;

        assert_eq!(api.url.as_deref(), Some("https://api.example.com/v2/content"));
        assert_eq!(api.hub_id.as_deref(), Some("hub1"));
        assert_eq!(api.user_agent.as_deref(), Some("tool/1.0"));
        assert_eq!(api.request_timeout, Some(10));
        assert!(api.cache_token);
    }

    #[test]
    fn parse_retry_section() {
        let toml = r"
            [retry]
            timeout = 30
            initial_delay_ms = 250
            max_delay_ms = 4000
            multiplier = 1.5
            retry_transport_errors = true
        ";

        let config = TomlConfig::parse(toml).unwrap();
        let retry = &config.retry;

        assert_eq!(retry.timeout, Some(30));
        assert_eq!(retry.initial_delay_ms, Some(250));
        assert_eq!(retry.max_delay_ms, Some(4000));
        assert_eq!(retry.multiplier, Some(1.5));
        assert!(retry.retry_transport_errors);
    }

    #[test]
    fn empty_config_uses_section_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.auth.client_id.is_none());
        assert!(config.api.hub_id.is_none());
        assert!(!config.api.cache_token);
        assert!(config.retry.timeout.is_none());
        assert!(!config.retry.retry_transport_errors);
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[webhook]\nurl = \"x\"");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[auth]\ntoken = \"x\"");

        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[api]\nrequest_timeout = \"soon\"");

        assert!(result.is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.auth.client_id.is_none());
    }

    #[test]
    fn template_mentions_every_section() {
        let template = default_config_template();

        for section in ["[auth]", "[api]", "[retry]"] {
            assert!(template.contains(section), "{section}");
        }
    }

    #[test]
    fn template_mentions_environment_variables() {
        let template = default_config_template();

        assert!(template.contains("AMPLIENCE_CLIENT_ID"));
        assert!(template.contains("AMPLIENCE_HUB_ID"));
    }
}
