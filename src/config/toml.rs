//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// OAuth2 configuration section
    #[serde(default)]
    pub auth: AuthSection,

    /// Management API configuration section
    #[serde(default)]
    pub api: ApiSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// OAuth2 configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// OAuth2 client ID
    pub client_id: Option<String>,

    /// OAuth2 client secret
    pub client_secret: Option<String>,

    /// Token endpoint URL
    pub url: Option<String>,
}

/// Management API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Content management API base URL
    pub url: Option<String>,

    /// Hub to operate on
    pub hub_id: Option<String>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,

    /// Timeout for a single HTTP round trip in seconds
    pub request_timeout: Option<u64>,

    /// Reuse access tokens until shortly before they expire
    #[serde(default)]
    pub cache_token: bool,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Total retry budget in seconds
    pub timeout: Option<u64>,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,

    /// Retry transport failures of the main request as well
    #[serde(default)]
    pub retry_transport_errors: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# amplience-mgmt Configuration File
# Every value can also be given on the command line; CLI values win.

[auth]
# OAuth2 client credentials (required for API commands)
# Environment: AMPLIENCE_CLIENT_ID, AMPLIENCE_CLIENT_SECRET
# client_id = "your-client-id"
# client_secret = "your-client-secret"

# Token endpoint (default: https://auth.amplience.net/oauth/token)
# url = "https://auth.amplience.net/oauth/token"

[api]
# Content management API base URL (default: https://api.amplience.net/v2/content)
# url = "https://api.amplience.net/v2/content"

# Hub to operate on (required for webhook commands)
# Environment: AMPLIENCE_HUB_ID
# hub_id = "5c1a2b3c4d5e6f7a8b9c0d1e"

# User-Agent header (default: amplience-mgmt/<version>)
# user_agent = "my-tool/1.0"

# Timeout for a single HTTP round trip in seconds (default: 30)
# request_timeout = 30

# Reuse access tokens until shortly before they expire (default: false)
# cache_token = false

[retry]
# Only HTTP 500 responses with a parseable error body are retried.
# Total time budget including retries, in seconds (default: 60)
# timeout = 60

# Initial retry delay in milliseconds (default: 500)
# initial_delay_ms = 500

# Maximum retry delay in milliseconds (default: 10000)
# max_delay_ms = 10000

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

# Retry connection failures and timeouts too (default: false)
# retry_transport_errors = false
"#
    .to_string()
}
