//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice.
///
/// Appends the `token` subcommand so only global options need to be given.
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["amplience-mgmt"];
    full_args.extend(args);
    full_args.push("token");
    Cli::parse_from_iter(full_args)
}

/// CLI args with credentials already set.
fn authed(args: &[&str]) -> Cli {
    let mut full_args = vec!["--client-id", "id", "--client-secret", "secret"];
    full_args.extend(args);
    cli(&full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod loading_tests;
