//! Notification endpoint trait and wire types.

use async_trait::async_trait;
use serde::Serialize;

/// Payload posted to the restaurant billing endpoint for one click.
///
/// The wire keys are fixed by the external API contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickNotification {
    #[serde(rename = "codContenidoRestaurante")]
    pub external_code: String,
    #[serde(rename = "costoClick")]
    pub click_cost: f64,
}

/// Transport-level failure delivering a notification.
///
/// Covers connection errors and timeouts; an HTTP error status is not a
/// `DeliveryError` — it is returned as a status code for the caller to judge.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Transport(String),
}

/// Interface to the external click-billing endpoint.
///
/// Implementations must bound each request with a timeout; a timed-out
/// request surfaces as [`DeliveryError::Transport`] and fails only the
/// record being delivered.
///
/// # Implementations
///
/// - [`crate::infrastructure::outbound::HttpNotificationEndpoint`] - reqwest client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationEndpoint: Send + Sync {
    /// Posts one click notification and returns the HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the request could not be
    /// completed (connection failure, timeout).
    async fn send(
        &self,
        bearer_token: &str,
        notification: &ClickNotification,
    ) -> Result<u16, DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_wire_keys() {
        let notification = ClickNotification {
            external_code: "PRM-0012".to_string(),
            click_cost: 1.5,
        };

        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(json["codContenidoRestaurante"], "PRM-0012");
        assert_eq!(json["costoClick"], 1.5);
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
