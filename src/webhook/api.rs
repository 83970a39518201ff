//! Webhook operations against the management API.

use http::{Method, StatusCode};

use super::{Webhook, WebhookError};
use crate::client::{ApiClient, ClientError, HttpClient, parse_body};
use crate::time::{Clock, Sleeper};

/// Webhook CRUD for the hub an [`ApiClient`] is bound to.
///
/// Every call goes through [`ApiClient::execute`], so transient API
/// failures are retried within the client's policy.
#[derive(Debug)]
pub struct WebhookApi<'a, H, C, S> {
    client: &'a ApiClient<H, C, S>,
    hub_id: &'a str,
}

impl<'a, H, C, S> WebhookApi<'a, H, C, S> {
    /// Creates a webhook API view over `client` and its hub.
    #[must_use]
    pub fn new(client: &'a ApiClient<H, C, S>) -> Self {
        Self {
            client,
            hub_id: client.hub_id(),
        }
    }

    /// Addresses another hub through the same client.
    #[must_use]
    pub const fn with_hub(mut self, hub_id: &'a str) -> Self {
        self.hub_id = hub_id;
        self
    }

    /// Returns the hub webhooks are read from and written to.
    #[must_use]
    pub const fn hub_id(&self) -> &str {
        self.hub_id
    }
}

impl<H: HttpClient, C: Clock, S: Sleeper> WebhookApi<'_, H, C, S> {
    /// Creates a webhook from `draft` and returns the stored resource.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Client`] if the request fails or the response
    /// is not a webhook.
    pub async fn create(&self, draft: &Webhook) -> Result<Webhook, WebhookError> {
        let url = self.client.hub_url(self.hub_id, "webhooks")?;
        let body = serde_json::to_vec(draft).map_err(WebhookError::Encode)?;

        let response = self.client.execute(Method::POST, url, Some(body)).await?;
        let webhook: Webhook = parse_body(&response)?;
        tracing::debug!(id = webhook.id.as_deref(), label = %webhook.label, "Created webhook");
        Ok(webhook)
    }

    /// Fetches a webhook, or `None` if the API reports it missing.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Client`] for failures other than 404.
    pub async fn get(&self, id: &str) -> Result<Option<Webhook>, WebhookError> {
        let url = self.webhook_url(id)?;

        match self.client.execute(Method::GET, url, None).await {
            Ok(response) => Ok(Some(parse_body(&response)?)),
            Err(e) if e.api_status() == Some(StatusCode::NOT_FOUND) => {
                tracing::debug!(id, "No webhook found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applies `draft` to an existing webhook.
    ///
    /// Headers and notifications are never sent: their secret values cannot
    /// be read back, so they are only set on creation.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Client`] if the request fails or the response
    /// is not a webhook.
    pub async fn update(&self, id: &str, draft: &Webhook) -> Result<Webhook, WebhookError> {
        let url = self.webhook_url(id)?;
        let mut draft = draft.clone();
        draft.headers = None;
        draft.notifications = None;
        let body = serde_json::to_vec(&draft).map_err(WebhookError::Encode)?;

        let response = self.client.execute(Method::PATCH, url, Some(body)).await?;
        Ok(parse_body(&response)?)
    }

    /// Deletes a webhook.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Client`] if the request fails
    /// - [`WebhookError::UnexpectedStatus`] for a success code other than 204
    pub async fn delete(&self, id: &str) -> Result<(), WebhookError> {
        let url = self.webhook_url(id)?;

        let response = self.client.execute(Method::DELETE, url, None).await?;
        if response.status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(WebhookError::UnexpectedStatus(response.status))
        }
    }

    fn webhook_url(&self, id: &str) -> Result<url::Url, ClientError> {
        self.client.hub_url(self.hub_id, &format!("webhooks/{id}"))
    }
}
