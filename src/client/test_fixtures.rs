//! Shared test fixtures for the client layer and its callers.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use super::{Credentials, Dispatcher, HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::time::{Clock, Sleeper};

pub const TOKEN_BODY: &str = r#"{"access_token":"abc123","expires_in":3600}"#;

/// Mock HTTP client that returns a scripted sequence of responses.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Scripts alternating token and API exchanges: every API response is
    /// preceded by a successful token response.
    pub fn with_token_per_call(api_responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        let mut responses = Vec::new();
        for response in api_responses {
            responses.push(Ok(token_response()));
            responses.push(response);
        }
        Self::new(responses)
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests that did not go to the token endpoint.
    pub fn api_requests(&self) -> Vec<HttpRequest> {
        self.captured_requests()
            .into_iter()
            .filter(|r| r.url != auth_url())
            .collect()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "MockClient ran out of scripted responses");
        responses.remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Clock and sleeper sharing one manually advanced time line.
///
/// Sleeping advances the clock by the requested duration, so retry deadlines
/// play out without real waiting.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    millis: Arc<AtomicU64>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap();
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualTime {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH
            + Duration::from_secs(1_000_000)
            + Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

impl Sleeper for ManualTime {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

pub fn auth_url() -> url::Url {
    url::Url::parse("https://auth.example.com/oauth/token").unwrap()
}

pub fn api_base() -> url::Url {
    url::Url::parse("https://api.example.com/v2/content").unwrap()
}

pub fn credentials() -> Credentials {
    Credentials::new("client-id", "client-secret")
}

pub fn token_response() -> HttpResponse {
    HttpResponse::with_status(http::StatusCode::OK, TOKEN_BODY)
}

pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse::with_status(http::StatusCode::from_u16(code).unwrap(), body.to_string())
}

pub fn server_error() -> HttpResponse {
    status(
        500,
        r#"{"errors":[{"level":"ERROR","code":"INTERNAL","message":"boom"}]}"#,
    )
}

pub fn dispatcher(mock: &Arc<MockClient>) -> Dispatcher<Arc<MockClient>> {
    Dispatcher::new(Arc::clone(mock), credentials(), auth_url())
}
