//! Management API client layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and handling responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a reqwest implementation ([`ReqwestClient`])
//! - OAuth2 client-credentials tokens ([`acquire_token`], [`TokenCache`])
//! - Authenticated single round trips ([`Dispatcher`])
//! - Classifying responses into success, retryable or fatal ([`classify`])
//! - Deadline-bounded retries ([`ApiClient`], [`RetryPolicy`])

mod api;
mod classify;
mod dispatch;
mod error;
mod http;
mod retry;
mod token;
mod transport;

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod retry_tests;

pub use api::ApiClient;
pub use classify::{ApiFailure, ErrorItem, ErrorResponse, Outcome, classify, parse_body};
pub use dispatch::Dispatcher;
pub use error::{AuthError, ClientError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
pub use token::{AccessToken, Credentials, REFRESH_MARGIN, TokenCache, acquire_token};
pub use transport::ReqwestClient;
