//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use amplience_mgmt::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing credentials, bad input.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, API error, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Where each required setting can be supplied: flag, environment variable
/// and config file key.
const SOURCES: [(&str, &str, &str, &str); 3] = [
    (field::CLIENT_ID, "--client-id", "AMPLIENCE_CLIENT_ID", "[auth] client_id"),
    (field::CLIENT_SECRET, "--client-secret", "AMPLIENCE_CLIENT_SECRET", "[auth] client_secret"),
    (field::HUB_ID, "--hub-id", "AMPLIENCE_HUB_ID", "[api] hub_id"),
];

/// Returns a hint for fixing `error`, if there is a useful one.
pub fn config_hint(error: &ConfigError) -> Option<String> {
    match error {
        ConfigError::MissingRequired { field: missing, .. } => SOURCES
            .iter()
            .find(|(name, ..)| name == missing)
            .map(|(name, flag, env, key)| {
                format!("Provide {name} with {flag}, {env}, or `{key}` in the config file.")
            }),
        ConfigError::FileRead { path, .. } => Some(format!(
            "Create {} with 'amplience-mgmt init --output {}'.",
            path.display(),
            path.display()
        )),
        _ => None,
    }
}

/// Prints the hint for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
