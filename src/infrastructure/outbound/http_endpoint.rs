//! reqwest-backed notification endpoint.

use super::endpoint::{ClickNotification, DeliveryError, NotificationEndpoint};
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

/// HTTP client for the restaurant billing endpoint.
///
/// Every request carries `Content-Type: application/json`,
/// `Accept: application/json`, and the caller's bearer token. The client-wide
/// timeout bounds each delivery attempt.
pub struct HttpNotificationEndpoint {
    client: reqwest::Client,
    dest_url: String,
}

impl HttpNotificationEndpoint {
    /// Builds the client for a destination URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the TLS backend cannot be
    /// initialized.
    pub fn new(dest_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, dest_url })
    }
}

#[async_trait]
impl NotificationEndpoint for HttpNotificationEndpoint {
    async fn send(
        &self,
        bearer_token: &str,
        notification: &ClickNotification,
    ) -> Result<u16, DeliveryError> {
        let response = self
            .client
            .post(&self.dest_url)
            .bearer_auth(bearer_token)
            .header(header::ACCEPT, "application/json")
            .json(notification)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Ok(response.status().as_u16())
    }
}
