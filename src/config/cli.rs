//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// amplience-mgmt: Amplience Dynamic Content management API client
///
/// Authenticates with OAuth2 client credentials, sends retried requests to
/// the content management API, manages webhooks and inspects webhook
/// filter arguments.
#[derive(Debug, Parser)]
#[command(name = "amplience-mgmt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// OAuth2 client ID
    #[arg(long, env = "AMPLIENCE_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "AMPLIENCE_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Hub to operate on
    #[arg(long, env = "AMPLIENCE_HUB_ID", global = true)]
    pub hub_id: Option<String>,

    /// Content management API base URL
    #[arg(long = "api-url", env = "AMPLIENCE_CONTENT_API_URL", global = true)]
    pub content_api_url: Option<String>,

    /// OAuth2 token endpoint URL
    #[arg(long = "auth-url", env = "AMPLIENCE_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Total time budget for a request including retries, in seconds
    #[arg(long = "retry-timeout", global = true)]
    pub retry_timeout: Option<u64>,

    /// Timeout for a single HTTP round trip, in seconds
    #[arg(long = "request-timeout", global = true)]
    pub request_timeout: Option<u64>,

    /// Reuse access tokens until shortly before they expire
    #[arg(long = "cache-token", global = true)]
    pub cache_token: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for amplience-mgmt
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "amplience-mgmt.toml")]
        output: PathBuf,
    },

    /// Request an access token and print its lifetime
    Token,

    /// Send a request relative to the content API base URL
    Request {
        /// HTTP method: GET, POST, PATCH or DELETE
        method: String,

        /// Path below the content API base URL, e.g. `hubs/<id>/webhooks`
        path: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },

    /// Manage webhooks of the configured hub
    Webhook {
        /// Webhook operation
        #[command(subcommand)]
        action: WebhookCommand,
    },

    /// Decode or encode webhook filter arguments
    Filter {
        /// Codec operation
        #[command(subcommand)]
        action: FilterCommand,
    },
}

/// Webhook operations.
///
/// IDs may be given as `<hub>:<webhook>` to address another hub.
#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    /// Print a webhook as JSON
    Get {
        /// Webhook ID
        id: String,
    },

    /// Create a webhook from a JSON definition file
    Create {
        /// Path to the webhook definition
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Update a webhook from a JSON definition file
    Update {
        /// Webhook ID
        id: String,

        /// Path to the webhook definition
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Delete a webhook
    Delete {
        /// Webhook ID
        id: String,
    },
}

/// Filter argument codec operations.
#[derive(Debug, Subcommand)]
pub enum FilterCommand {
    /// Decode one filter argument object and describe it
    Decode {
        /// Argument JSON, e.g. '{"value": ["a", "b"]}'
        json: String,
    },

    /// Encode one filter argument from its parts
    Encode {
        /// Path of the filtered field
        #[arg(long = "json-path")]
        json_path: Option<String>,

        /// Scalar value for an `equal` filter
        #[arg(long = "eq")]
        eq_value: Option<String>,

        /// Value for an `in` filter (can be specified multiple times)
        #[arg(long = "in", value_name = "VALUE")]
        in_values: Vec<String>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if the command talks to the management API.
    ///
    /// `init` and `filter` work offline and need no credentials.
    #[must_use]
    pub const fn needs_api(&self) -> bool {
        !matches!(self.command, Command::Init { .. } | Command::Filter { .. })
    }
}
