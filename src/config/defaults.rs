//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default content management API base URL.
pub const CONTENT_API_URL: &str = "https://api.amplience.net/v2/content";

/// Default OAuth2 token endpoint.
pub const AUTH_URL: &str = "https://auth.amplience.net/oauth/token";

/// `User-Agent` sent with API requests.
pub const USER_AGENT: &str = concat!("amplience-mgmt/", env!("CARGO_PKG_VERSION"));

/// Default total retry budget in seconds.
pub const RETRY_TIMEOUT_SECS: u64 = 60;

/// Default initial retry delay in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 10_000;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Default timeout for a single HTTP round trip in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "amplience-mgmt.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

/// Default retry budget as Duration.
#[must_use]
pub const fn retry_timeout() -> Duration {
    Duration::from_secs(RETRY_TIMEOUT_SECS)
}

/// Location of the per-user configuration file, e.g.
/// `~/.config/amplience-mgmt/amplience-mgmt.toml` on Linux.
///
/// Returns `None` if the platform has no configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("amplience-mgmt").join(CONFIG_FILE_NAME))
}
