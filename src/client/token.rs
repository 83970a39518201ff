//! OAuth2 client-credentials token acquisition.

use std::fmt;
use std::time::{Duration, SystemTime};

use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use super::{AuthError, HttpClient, HttpRequest};
use crate::time::Clock;

/// Client credentials for the management API token endpoint.
///
/// Empty values are accepted here; rejecting them is the configuration
/// layer's job.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Creates credentials from a client ID and secret.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Encodes the `application/x-www-form-urlencoded` token request body.
    #[must_use]
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("grant_type", "client_credentials")
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Body of a successful token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    session_expires_in: Option<u64>,
}

/// A bearer token issued by the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_in: Option<Duration>,
    session_expires_in: Option<Duration>,
}

impl AccessToken {
    /// Creates a token with an optional declared lifetime.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_in: Option<Duration>) -> Self {
        Self {
            token: token.into(),
            expires_in,
            session_expires_in: None,
        }
    }

    /// Returns the bearer token string.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.token
    }

    /// Returns the lifetime declared by the token endpoint (`expires_in`).
    #[must_use]
    pub const fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    /// Returns the session lifetime (`session_expires_in`), if reported.
    #[must_use]
    pub const fn session_expires_in(&self) -> Option<Duration> {
        self.session_expires_in
    }

    /// Builds the `Authorization` header value for this token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the token contains characters
    /// that cannot appear in a header.
    pub fn bearer_header(&self) -> Result<HeaderValue, AuthError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| AuthError::MalformedToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("session_expires_in", &self.session_expires_in)
            .finish()
    }
}

/// Requests a token with the client-credentials grant.
///
/// Performs exactly one POST to `auth_url`; nothing is retried or cached.
///
/// # Errors
///
/// - [`AuthError::Transport`] if the request cannot be completed
/// - [`AuthError::Status`] if the endpoint answers with anything but 200
/// - [`AuthError::InvalidBody`] if a 200 body is not a token response
/// - [`AuthError::NoToken`] if a 200 body carries an empty `access_token`
pub async fn acquire_token<H: HttpClient>(
    http: &H,
    credentials: &Credentials,
    auth_url: &Url,
) -> Result<AccessToken, AuthError> {
    let request = HttpRequest::post(auth_url.clone())
        .with_header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        )
        .with_body(credentials.form_body().into_bytes());

    tracing::debug!(client_id = credentials.client_id(), %auth_url, "Requesting access token");
    let response = http.request(request).await?;

    if response.status != http::StatusCode::OK {
        return Err(AuthError::Status {
            status: response.status,
        });
    }

    let body: TokenResponse =
        serde_json::from_slice(&response.body).map_err(AuthError::InvalidBody)?;
    if body.access_token.is_empty() {
        return Err(AuthError::NoToken);
    }

    Ok(AccessToken {
        token: body.access_token,
        expires_in: body.expires_in.map(Duration::from_secs),
        session_expires_in: body.session_expires_in.map(Duration::from_secs),
    })
}

/// Tokens closer than this to expiry are refreshed instead of reused.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct CachedToken {
    token: AccessToken,
    expires_at: SystemTime,
}

/// Single-slot token cache with expiry-aware refresh.
///
/// The lock is held across a refresh, so concurrent callers wait for one
/// token request instead of issuing their own. Tokens without a declared
/// lifetime are never cached.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it is still fresh, otherwise fetches a new
    /// one with `fetch` and stores it.
    ///
    /// # Errors
    ///
    /// Propagates any error from `fetch`; the slot is left empty.
    pub async fn get_or_refresh<C, F, Fut>(
        &self,
        clock: &C,
        fetch: F,
    ) -> Result<AccessToken, AuthError>
    where
        C: Clock,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = Result<AccessToken, AuthError>> + Send,
    {
        let mut slot = self.slot.lock().await;
        let now = clock.now();

        if let Some(cached) = slot.as_ref() {
            if cached.expires_at > now + REFRESH_MARGIN {
                tracing::trace!("Reusing cached access token");
                return Ok(cached.token.clone());
            }
        }

        *slot = None;
        let token = fetch().await?;
        if let Some(lifetime) = token.expires_in() {
            *slot = Some(CachedToken {
                token: token.clone(),
                expires_at: now + lifetime,
            });
        }
        Ok(token)
    }

    /// Drops the cached token, forcing the next call to fetch.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
