//! Command execution.
//!
//! Builds the API client from validated configuration and runs one
//! subcommand against it. Every command returns the text to print on
//! stdout; logging goes to stderr through `tracing`.

use std::path::{Path, PathBuf};

use http::Method;
use thiserror::Error;
use tokio::signal;

use amplience_mgmt::client::{
    ApiClient, ClientError, Dispatcher, HttpClient, HttpError, ReqwestClient,
};
use amplience_mgmt::config::{Command, ConfigError, FilterCommand, ValidatedConfig, WebhookCommand, field};
use amplience_mgmt::filter::{self, FilterArgument, FilterError, RawArg};
use amplience_mgmt::resource_id::{create_id, parse_id};
use amplience_mgmt::time::{Clock, Sleeper};
use amplience_mgmt::webhook::{WebhookApi, WebhookError, WebhookState};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// A value the command needs is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request against the management API failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A webhook operation failed.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// A filter argument could not be decoded or encoded.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The method given to `request` is not an HTTP method.
    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// A webhook definition file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadFile {
        /// Path to the definition
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A webhook definition file is not valid JSON for a webhook.
    #[error("Invalid webhook definition in '{}': {source}", path.display())]
    Definition {
        /// Path to the definition
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The requested webhook does not exist.
    #[error("Webhook '{0}' not found")]
    NotFound(String),

    /// A result could not be rendered as JSON.
    #[error("Failed to format output: {0}")]
    Output(#[source] serde_json::Error),

    /// The command works on local files and is not run against the API.
    #[error("'{0}' does not talk to the API; run it without a client")]
    Offline(&'static str),

    /// Ctrl+C arrived before the command finished.
    #[error("Interrupted")]
    Interrupted,
}

/// Executes an API command with the given configuration.
///
/// Returns the text to print on success.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the command fails, or a
/// shutdown signal arrives first.
///
/// Excluded from coverage - requires real network access and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<String, RunError> {
    let client = create_client(config)?;

    tokio::select! {
        result = run_command(command, config, &client) => result,
        () = shutdown_signal() => {
            tracing::info!("Shutdown signal received, stopping...");
            Err(RunError::Interrupted)
        }
    }
}

/// Creates the API client described by `config`.
///
/// # Errors
///
/// Returns [`RunError::HttpClient`] if the HTTP client cannot be built.
pub fn create_client(config: &ValidatedConfig) -> Result<ApiClient<ReqwestClient>, RunError> {
    let http = ReqwestClient::with_timeout(config.request_timeout).map_err(RunError::HttpClient)?;

    let dispatcher = Dispatcher::new(http, config.credentials.clone(), config.auth_url.clone())
        .with_user_agent(config.user_agent.clone())
        .with_token_cache(config.cache_token);

    Ok(ApiClient::new(
        dispatcher,
        config.content_api_url.clone(),
        config.hub_id.clone().unwrap_or_default(),
    )
    .with_retry_policy(config.retry_policy.clone()))
}

/// Runs one command against `client`.
///
/// Filter commands need no network and are run locally.
///
/// # Errors
///
/// Returns [`RunError::Offline`] for `init`, otherwise the first error the
/// command hits.
pub async fn run_command<H, C, S>(
    command: &Command,
    config: &ValidatedConfig,
    client: &ApiClient<H, C, S>,
) -> Result<String, RunError>
where
    H: HttpClient,
    C: Clock,
    S: Sleeper,
{
    match command {
        Command::Token => {
            let token = client.dispatcher().token().await.map_err(ClientError::from)?;
            tracing::info!(
                expires_in = token.expires_in().map(|d| d.as_secs()),
                "Access token acquired"
            );
            Ok(token.secret().to_string())
        }
        Command::Request { method, path, body } => {
            let method = parse_method(method)?;
            let url = client.url(path)?;
            let body = body.as_ref().map(|b| b.as_bytes().to_vec());

            let response = client.execute(method, url, body).await?;
            Ok(String::from_utf8_lossy(&response.body).into_owned())
        }
        Command::Webhook { action } => run_webhook(action, config, client).await,
        Command::Filter { action } => run_filter(action),
        Command::Init { .. } => Err(RunError::Offline("init")),
    }
}

async fn run_webhook<H, C, S>(
    action: &WebhookCommand,
    config: &ValidatedConfig,
    client: &ApiClient<H, C, S>,
) -> Result<String, RunError>
where
    H: HttpClient,
    C: Clock,
    S: Sleeper,
{
    match action {
        WebhookCommand::Get { id } => {
            let (hub, webhook_id) = resolve_target(id, config.hub_id.as_deref())?;
            let webhook = WebhookApi::new(client)
                .with_hub(hub)
                .get(webhook_id)
                .await?
                .ok_or_else(|| RunError::NotFound(create_id(hub, webhook_id)))?;
            to_json(&webhook)
        }
        WebhookCommand::Create { file } => {
            let hub = config.require_hub()?;
            let draft = read_definition(file)?.to_draft()?;
            let created = WebhookApi::new(client).with_hub(hub).create(&draft).await?;
            if let Some(id) = created.id.as_deref() {
                tracing::info!(id = %create_id(hub, id), "Webhook created");
            }
            to_json(&created)
        }
        WebhookCommand::Update { id, file } => {
            let (hub, webhook_id) = resolve_target(id, config.hub_id.as_deref())?;
            let mut state = read_definition(file)?;
            let draft = state.to_draft()?;
            let updated = WebhookApi::new(client)
                .with_hub(hub)
                .update(webhook_id, &draft)
                .await?;
            state.refresh_from(&updated)?;
            to_json(&state)
        }
        WebhookCommand::Delete { id } => {
            let (hub, webhook_id) = resolve_target(id, config.hub_id.as_deref())?;
            WebhookApi::new(client)
                .with_hub(hub)
                .delete(webhook_id)
                .await?;
            tracing::info!(id = %create_id(hub, webhook_id), "Webhook deleted");
            Ok(String::new())
        }
    }
}

/// Runs a filter codec command. Needs no configuration.
///
/// # Errors
///
/// Returns [`RunError::Filter`] if the input cannot be decoded or the parts
/// do not form a single argument.
pub fn run_filter(action: &FilterCommand) -> Result<String, RunError> {
    match action {
        FilterCommand::Decode { json } => {
            let argument = filter::decode(json.as_bytes())?;
            let description = serde_json::json!({
                "kind": argument_kind(&argument),
                "argument": RawArg::from(argument),
            });
            serde_json::to_string_pretty(&description).map_err(RunError::Output)
        }
        FilterCommand::Encode {
            json_path,
            eq_value,
            in_values,
        } => {
            let raw = RawArg {
                json_path: json_path.clone(),
                eq_value: eq_value.clone(),
                in_values: (!in_values.is_empty()).then(|| in_values.clone()),
            };
            let bytes = filter::encode(&raw)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Splits a possibly composite `<hub>:<id>` into hub and webhook ID.
///
/// A bare ID uses the configured hub.
fn resolve_target<'a>(
    id: &'a str,
    configured_hub: Option<&'a str>,
) -> Result<(&'a str, &'a str), RunError> {
    match parse_id(id) {
        ("", webhook_id) => configured_hub.map(|hub| (hub, webhook_id)).ok_or_else(|| {
            RunError::Config(ConfigError::missing(
                field::HUB_ID,
                "Use --hub-id, AMPLIENCE_HUB_ID, api.hub_id in config file, or a <hub>:<id> ID",
            ))
        }),
        (hub, webhook_id) => Ok((hub, webhook_id)),
    }
}

fn parse_method(method: &str) -> Result<Method, RunError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| RunError::InvalidMethod(method.to_string()))
}

fn read_definition(path: &Path) -> Result<WebhookState, RunError> {
    let content = std::fs::read_to_string(path).map_err(|e| RunError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| RunError::Definition {
        path: path.to_path_buf(),
        source: e,
    })
}

const fn argument_kind(argument: &FilterArgument) -> &'static str {
    match argument {
        FilterArgument::PathOnly(_) => "path",
        FilterArgument::EqualValue(_) => "equal",
        FilterArgument::InValues(_) => "in",
        FilterArgument::Empty => "empty",
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RunError> {
    serde_json::to_string_pretty(value).map_err(RunError::Output)
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
