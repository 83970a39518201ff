//! Configuration layer for amplience-mgmt.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - including their `AMPLIENCE_*` environment fallbacks
//! 2. **TOML config file** - `--config`, or the per-user file if it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Credentials have no defaults. The hub ID is optional here and only
//! required by commands that address a hub.
//!
//! # Boolean Flag Semantics
//!
//! `--cache-token` uses OR semantics: if set `true` in either CLI or TOML,
//! the result is `true`.
//!
//! # TOML-Only Options
//!
//! Some options are not available via CLI:
//! - `api.user_agent`
//! - `retry.initial_delay_ms`, `retry.max_delay_ms`, `retry.multiplier`
//! - `retry.retry_transport_errors`

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FilterCommand, WebhookCommand};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
