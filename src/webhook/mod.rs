//! Webhook management.
//!
//! This module provides:
//! - The webhook resource as the API exchanges it ([`Webhook`])
//! - Supported events ([`WebhookEvent`]) and draft validation
//! - A flat definition format ([`WebhookState`]) convertible to drafts
//! - CRUD operations over an [`ApiClient`](crate::client::ApiClient) ([`WebhookApi`])

mod api;
mod error;
mod model;
mod state;
pub mod validation;

#[cfg(test)]
mod model_tests;
#[cfg(test)]
mod state_tests;

pub use api::WebhookApi;
pub use error::WebhookError;
pub use model::{CustomPayload, Notification, Webhook, WebhookEvent, WebhookHeader};
pub use state::{HeaderState, NotificationState, WebhookState};
