//! Management API client with retries.

use http::{Method, StatusCode};
use url::Url;

use super::{ClientError, Dispatcher, HttpClient, HttpResponse, Outcome, RetryPolicy, classify};
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper};

/// Client for the content management API of one hub.
///
/// Wraps a [`Dispatcher`] with URL building and a retry loop: each attempt
/// dispatches and classifies, and only [`Outcome::Retryable`] results are
/// retried until the [`RetryPolicy`] budget runs out.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: Clock used for token expiry and the retry budget
/// - `S`: Sleeper used between attempts
#[derive(Debug)]
pub struct ApiClient<H, C = SystemClock, S = TokioSleeper> {
    dispatcher: Dispatcher<H, C>,
    sleeper: S,
    base_url: Url,
    hub_id: String,
    retry_policy: RetryPolicy,
}

impl<H, C> ApiClient<H, C, TokioSleeper> {
    /// Creates a client for `hub_id` rooted at the content API `base_url`.
    #[must_use]
    pub fn new(dispatcher: Dispatcher<H, C>, base_url: Url, hub_id: impl Into<String>) -> Self {
        Self {
            dispatcher,
            sleeper: TokioSleeper,
            base_url,
            hub_id: hub_id.into(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, C, S> ApiClient<H, C, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ApiClient<H, C, S2> {
        ApiClient {
            dispatcher: self.dispatcher,
            sleeper,
            base_url: self.base_url,
            hub_id: self.hub_id,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<H, C> {
        &self.dispatcher
    }

    /// Returns the hub this client manages.
    #[must_use]
    pub fn hub_id(&self) -> &str {
        &self.hub_id
    }

    /// Returns the content API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Builds an absolute URL for `path` below the content API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the result is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
            url: joined.clone(),
            reason: e.to_string(),
        })
    }

    /// Builds an absolute URL for `path` below `hubs/{hub_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the result is not a valid URL.
    pub fn hub_url(&self, hub_id: &str, path: &str) -> Result<Url, ClientError> {
        self.url(&format!("hubs/{hub_id}/{}", path.trim_start_matches('/')))
    }
}

impl<H: HttpClient, C: Clock, S: Sleeper> ApiClient<H, C, S> {
    /// Sends a request, retrying transient failures within the policy budget.
    ///
    /// The body is re-sent unchanged on every attempt.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] for a non-retryable API failure
    /// - [`ClientError::RetriesExhausted`] when the budget ran out while the
    ///   API kept failing transiently
    /// - any error from [`Dispatcher::dispatch`] (transport failures only
    ///   when the policy does not retry them)
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ClientError> {
        let started = self.dispatcher.clock().now();
        let mut retry: u32 = 0;

        loop {
            let last_error = match self.attempt(method.clone(), url.clone(), body.clone()).await {
                Ok(response) => return Ok(response),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(message)) => message,
            };

            let delay = self.retry_policy.delay_for_retry(retry);
            let elapsed = self.dispatcher.clock().elapsed_since(started);
            if !self.retry_policy.fits_budget(elapsed, delay) {
                return Err(ClientError::RetriesExhausted {
                    attempts: retry + 1,
                    last_error,
                });
            }

            tracing::warn!(
                %method,
                %url,
                attempt = retry + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retryable failure: {last_error}"
            );
            self.sleeper.sleep(delay).await;
            retry += 1;
        }
    }

    /// Runs one dispatch and sorts the result by what the loop should do.
    async fn attempt(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, AttemptError> {
        match self.dispatcher.dispatch(method, url, body).await {
            Ok(response) => match classify(Some(response)) {
                Outcome::Ok(response) => Ok(response),
                Outcome::Retryable(failure) => Err(AttemptError::Retryable(failure.message)),
                Outcome::Fatal(failure) => {
                    // A rejected token must not outlive the request that exposed it.
                    if failure.status == Some(StatusCode::UNAUTHORIZED) {
                        self.dispatcher.invalidate_token().await;
                    }
                    Err(AttemptError::Fatal(ClientError::Api(failure)))
                }
            },
            Err(ClientError::Transport(e)) if self.retry_policy.retry_transport_errors => {
                Err(AttemptError::Retryable(e.to_string()))
            }
            Err(e) => Err(AttemptError::Fatal(e)),
        }
    }
}

enum AttemptError {
    Retryable(String),
    Fatal(ClientError),
}
