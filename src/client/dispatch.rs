//! Authenticated request dispatch.

use http::Method;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use url::Url;

use super::token::{TokenCache, acquire_token};
use super::{AccessToken, AuthError, ClientError, Credentials, HttpClient, HttpRequest, HttpResponse};
use crate::time::{Clock, SystemClock};

/// Sends single requests to the management API with a bearer token attached.
///
/// Each call to [`Dispatcher::dispatch`] performs one round trip and hands
/// back the raw response; classification and retries belong to the caller.
/// By default every dispatch requests a fresh token. [`with_token_cache`]
/// turns on reuse of unexpired tokens.
///
/// [`with_token_cache`]: Dispatcher::with_token_cache
#[derive(Debug)]
pub struct Dispatcher<H, C = SystemClock> {
    http: H,
    clock: C,
    credentials: Credentials,
    auth_url: Url,
    user_agent: Option<HeaderValue>,
    token_cache: Option<TokenCache>,
}

impl<H> Dispatcher<H, SystemClock> {
    /// Creates a dispatcher that authenticates against `auth_url`.
    #[must_use]
    pub const fn new(http: H, credentials: Credentials, auth_url: Url) -> Self {
        Self {
            http,
            clock: SystemClock,
            credentials,
            auth_url,
            user_agent: None,
            token_cache: None,
        }
    }
}

impl<H, C> Dispatcher<H, C> {
    /// Replaces the clock used for token expiry.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Dispatcher<H, C2> {
        Dispatcher {
            http: self.http,
            clock,
            credentials: self.credentials,
            auth_url: self.auth_url,
            user_agent: self.user_agent,
            token_cache: self.token_cache,
        }
    }

    /// Sets the `User-Agent` header sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: HeaderValue) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Enables or disables reuse of unexpired tokens across dispatches.
    #[must_use]
    pub fn with_token_cache(mut self, enabled: bool) -> Self {
        self.token_cache = enabled.then(TokenCache::new);
        self
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }

    /// Returns the clock used for token expiry.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the credentials used for token requests.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub const fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    /// Returns true if tokens are reused across dispatches.
    #[must_use]
    pub const fn caches_tokens(&self) -> bool {
        self.token_cache.is_some()
    }

    /// Forgets the cached token, if any, so the next dispatch fetches one.
    pub async fn invalidate_token(&self) {
        if let Some(cache) = &self.token_cache {
            tracing::debug!("Dropping cached access token");
            cache.invalidate().await;
        }
    }
}

impl<H: HttpClient, C: Clock> Dispatcher<H, C> {
    /// Obtains a bearer token, from the cache when enabled and still fresh.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token endpoint cannot issue a token.
    pub async fn token(&self) -> Result<AccessToken, AuthError> {
        let fetch = || acquire_token(&self.http, &self.credentials, &self.auth_url);
        match &self.token_cache {
            Some(cache) => cache.get_or_refresh(&self.clock, fetch).await,
            None => fetch().await,
        }
    }

    /// Performs one authenticated round trip.
    ///
    /// GET and DELETE never carry a body. POST and PATCH always do; a missing
    /// body is sent as an empty buffer.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnsupportedMethod`] for methods other than GET, POST,
    ///   PATCH and DELETE, before any network activity
    /// - [`ClientError::Auth`] if no token could be obtained; the main request
    ///   is then not sent
    /// - [`ClientError::Transport`] if the main request fails on the wire
    pub async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ClientError> {
        let request = match method {
            Method::GET | Method::DELETE => HttpRequest::new(method, url),
            Method::POST | Method::PATCH => {
                HttpRequest::new(method, url).with_body(body.unwrap_or_default())
            }
            other => return Err(ClientError::UnsupportedMethod(other)),
        };

        let token = self.token().await?;

        let mut request = request
            .with_header(AUTHORIZATION, token.bearer_header()?)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(user_agent) = &self.user_agent {
            request = request.with_header(USER_AGENT, user_agent.clone());
        }

        tracing::debug!(method = %request.method, url = %request.url, "Dispatching request");
        let response = self
            .http
            .request(request)
            .await
            .map_err(ClientError::Transport)?;
        tracing::debug!(status = %response.status, "Received response");

        Ok(response)
    }
}
