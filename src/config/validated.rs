//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::client::{Credentials, RetryPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// OAuth2 client credentials
    pub credentials: Credentials,

    /// Token endpoint
    pub auth_url: Url,

    /// Content management API base URL
    pub content_api_url: Url,

    /// Hub to operate on, if configured
    pub hub_id: Option<String>,

    /// `User-Agent` header sent with API requests
    pub user_agent: HeaderValue,

    /// Timeout for a single HTTP round trip
    pub request_timeout: Duration,

    /// Whether access tokens are reused across requests
    pub cache_token: bool,

    /// Retry policy for failed API requests
    pub retry_policy: RetryPolicy,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ client_id: {}, api: {}, auth: {}, hub: {}, cache_token: {}, \
             request_timeout: {}s, retry: {}ms..{}ms within {}s }}",
            self.credentials.client_id(),
            self.content_api_url,
            self.auth_url,
            self.hub_id.as_deref().unwrap_or("none"),
            self.cache_token,
            self.request_timeout.as_secs(),
            self.retry_policy.initial_delay.as_millis(),
            self.retry_policy.max_delay.as_millis(),
            self.retry_policy.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (including their environment fallbacks) take precedence
    /// over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing or empty
    /// - A URL is invalid
    /// - The hub ID is malformed
    /// - Duration values are zero
    /// - Retry settings are inconsistent
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credentials = Self::resolve_credentials(cli, toml)?;

        let auth_url = resolve_url(
            cli.auth_url.as_deref(),
            toml.and_then(|t| t.auth.url.as_deref()),
            defaults::AUTH_URL,
        )?;

        let content_api_url = resolve_url(
            cli.content_api_url.as_deref(),
            toml.and_then(|t| t.api.url.as_deref()),
            defaults::CONTENT_API_URL,
        )?;

        let hub_id = Self::resolve_hub_id(cli, toml)?;
        let user_agent = Self::resolve_user_agent(toml)?;
        let request_timeout = Self::resolve_request_timeout(cli, toml)?;

        // Flags only enable
        let cache_token = cli.cache_token || toml.is_some_and(|t| t.api.cache_token);

        let retry_policy = Self::build_retry_policy(cli, toml)?;

        Ok(Self {
            credentials,
            auth_url,
            content_api_url,
            hub_id,
            user_agent,
            request_timeout,
            cache_token,
            retry_policy,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Uses `cli.config` if set. Otherwise the per-user file from
    /// [`defaults::config_path`] is read when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(&expand_home(path))?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the configured hub or an error naming how to set it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no hub was configured.
    pub fn require_hub(&self) -> Result<&str, ConfigError> {
        self.hub_id.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::HUB_ID,
                "Use --hub-id, AMPLIENCE_HUB_ID or set api.hub_id in config file",
            )
        })
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Credentials, ConfigError> {
        let client_id = cli
            .client_id
            .as_deref()
            .or_else(|| toml.and_then(|t| t.auth.client_id.as_deref()))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::CLIENT_ID,
                    "Use --client-id, AMPLIENCE_CLIENT_ID or set auth.client_id in config file",
                )
            })?;

        let client_secret = cli
            .client_secret
            .as_deref()
            .or_else(|| toml.and_then(|t| t.auth.client_secret.as_deref()))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::CLIENT_SECRET,
                    "Use --client-secret, AMPLIENCE_CLIENT_SECRET or set auth.client_secret in config file",
                )
            })?;

        Ok(Credentials::new(client_id.trim(), client_secret))
    }

    fn resolve_hub_id(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<String>, ConfigError> {
        let Some(hub) = cli
            .hub_id
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.hub_id.as_deref()))
        else {
            return Ok(None);
        };

        let hub = hub.trim();
        if hub.is_empty() {
            return Err(ConfigError::InvalidHubId {
                value: hub.to_string(),
                reason: "must not be empty",
            });
        }
        if hub.contains(['/', ':', '?', '#']) || hub.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHubId {
                value: hub.to_string(),
                reason: "must not contain whitespace, '/', ':', '?' or '#'",
            });
        }

        Ok(Some(hub.to_string()))
    }

    fn resolve_user_agent(toml: Option<&TomlConfig>) -> Result<HeaderValue, ConfigError> {
        let value = toml
            .and_then(|t| t.api.user_agent.as_deref())
            .unwrap_or(defaults::USER_AGENT);

        HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidUserAgent {
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_request_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .request_timeout
            .or_else(|| toml.and_then(|t| t.api.request_timeout))
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "request_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Zero is allowed and disables retries
        let timeout_secs = cli
            .retry_timeout
            .or_else(|| retry.and_then(|r| r.timeout))
            .unwrap_or(defaults::RETRY_TIMEOUT_SECS);

        let initial_delay_ms = retry
            .and_then(|r| r.initial_delay_ms)
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if initial_delay_ms == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay_ms must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_ms < initial_delay_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay_ms ({max_delay_ms}) must be >= initial_delay_ms ({initial_delay_ms})"
            )));
        }

        Ok(RetryPolicy::new()
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_initial_delay(Duration::from_millis(initial_delay_ms))
            .with_max_delay(Duration::from_millis(max_delay_ms))
            .with_multiplier(multiplier)
            .with_retry_transport_errors(retry.is_some_and(|r| r.retry_transport_errors)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_url(cli: Option<&str>, toml: Option<&str>, default: &str) -> Result<Url, ConfigError> {
    let url_str = cli.or(toml).unwrap_or(default);

    let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    Ok(url)
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
