//! Relay of unconfirmed clicks to external restaurant billing endpoints.
//!
//! The reconciliation run is triggered manually (no background scheduler):
//! fetch every unnotified click, mint or reuse one bearer token for the whole
//! batch, post each click to the external endpoint in fetch order, and mark
//! it notified locally only after a verified successful acknowledgement.
//! Confirmation happens after delivery, so a crash between the two can cause
//! a duplicate notification on the next run — the endpoint must tolerate
//! duplicates; confirmed clicks are never fetched again.

use std::sync::Arc;

use crate::application::services::token_service::TokenService;
use crate::domain::entities::{PendingClick, SkipReason};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::infrastructure::outbound::{ClickNotification, NotificationEndpoint};
use serde_json::json;
use tracing::{error, info, warn};

/// What happened to one pending click during a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Delivered and confirmed; counts toward the run's success total.
    Notified,
    /// Required data missing; neither a success nor a failure.
    Skipped(SkipReason),
    /// The endpoint answered with a non-success status.
    Rejected(u16),
    /// The request could not be completed (transport error or timeout).
    Failed,
    /// Delivered, but the local confirmation did not update any row. The
    /// remote side believes it was notified while local state disagrees;
    /// flagged for operational follow-up, never auto-retried.
    Unconfirmed,
}

/// Per-record outcomes of one reconciliation run.
///
/// The HTTP boundary only exposes [`NotifyReport::notified`]; the full
/// outcome list exists so behavior is testable without parsing logs.
#[derive(Debug, Default)]
pub struct NotifyReport {
    outcomes: Vec<(Option<i32>, ClickOutcome)>,
}

impl NotifyReport {
    fn push(&mut self, click_id: Option<i32>, outcome: ClickOutcome) {
        self.outcomes.push((click_id, outcome));
    }

    /// Number of records fetched for this run.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of records both delivered and confirmed.
    pub fn notified(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == ClickOutcome::Notified)
            .count()
    }

    /// All outcomes keyed by click id, in processing order.
    pub fn outcomes(&self) -> &[(Option<i32>, ClickOutcome)] {
        &self.outcomes
    }
}

/// Service relaying unnotified clicks to the external billing endpoint.
///
/// Records are processed strictly sequentially in fetch order so the
/// confirmation order tracks the notification order; one record's failure
/// never aborts the batch.
pub struct NotificationService<R: ClickRepository> {
    repository: Arc<R>,
    endpoint: Arc<dyn NotificationEndpoint>,
    tokens: TokenService,
}

impl<R: ClickRepository> NotificationService<R> {
    /// Creates a notification service.
    pub fn new(
        repository: Arc<R>,
        endpoint: Arc<dyn NotificationEndpoint>,
        tokens: TokenService,
    ) -> Self {
        Self {
            repository,
            endpoint,
            tokens,
        }
    }

    /// Notifies every unnotified click, optionally filtered by restaurant.
    ///
    /// An empty fetch returns immediately without minting a token or making
    /// any HTTP call. Per-record issues are absorbed into the report; only
    /// conditions that make the whole run meaningless propagate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the initial fetch fails or the
    /// bearer token cannot be signed.
    pub async fn notify_pending(
        &self,
        restaurant_id: Option<i32>,
    ) -> Result<NotifyReport, AppError> {
        let pending = self
            .repository
            .get_unnotified_clicks(restaurant_id, None, None)
            .await?;

        if pending.is_empty() {
            info!("No clicks pending notification");
            return Ok(NotifyReport::default());
        }

        // One token per run, shared across the batch. A signing failure
        // aborts before any notification is attempted.
        let token = self.tokens.bearer_token().map_err(|e| {
            AppError::internal(
                "Failed to sign notification token",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let mut report = NotifyReport::default();
        for click in &pending {
            let outcome = self.notify_one(&token, click).await;
            report.push(click.click_id, outcome);
        }

        info!(
            "Notified {} of {} pending clicks",
            report.notified(),
            report.total()
        );
        Ok(report)
    }

    async fn notify_one(&self, token: &str, click: &PendingClick) -> ClickOutcome {
        let target = match click.notifiable() {
            Ok(target) => target,
            Err(reason) => {
                warn!("Skipping click {:?}: {}", click.click_id, reason);
                return ClickOutcome::Skipped(reason);
            }
        };

        let notification = ClickNotification {
            external_code: target.external_code.to_string(),
            click_cost: target.click_cost,
        };

        let status = match self.endpoint.send(token, &notification).await {
            Ok(status) => status,
            Err(e) => {
                error!("Error notifying click {}: {}", target.click_id, e);
                return ClickOutcome::Failed;
            }
        };

        if !(200..300).contains(&status) {
            warn!(
                "Notification for click {} rejected: status {}",
                target.click_id, status
            );
            return ClickOutcome::Rejected(status);
        }

        match self
            .repository
            .confirm_click_notified(
                target.restaurant_id,
                target.language_id,
                target.content_id,
                target.click_id,
            )
            .await
        {
            Ok(true) => {
                info!("Click {} notified and confirmed", target.click_id);
                ClickOutcome::Notified
            }
            Ok(false) => {
                warn!(
                    "Click {} notified but not confirmed locally",
                    target.click_id
                );
                ClickOutcome::Unconfirmed
            }
            Err(e) => {
                error!(
                    "Click {} notified but confirmation failed: {}",
                    target.click_id, e
                );
                ClickOutcome::Unconfirmed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;
    use crate::infrastructure::outbound::{DeliveryError, MockNotificationEndpoint};
    use serde_json::json;

    fn pending(click_id: i32, external_code: Option<&str>) -> PendingClick {
        serde_json::from_value(json!({
            "restaurant_id": 5,
            "language_id": 1,
            "content_id": 12,
            "click_id": click_id,
            "click_cost": 1.5,
            "external_code": external_code,
            "notified": 0
        }))
        .unwrap()
    }

    fn service(
        repository: MockClickRepository,
        endpoint: MockNotificationEndpoint,
    ) -> NotificationService<MockClickRepository> {
        NotificationService::new(
            Arc::new(repository),
            Arc::new(endpoint),
            TokenService::new("promo-relay".into(), "test-secret".into(), 300),
        )
    }

    #[tokio::test]
    async fn test_empty_fetch_short_circuits() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        // No expectations on the endpoint: any call would panic.
        let endpoint = MockNotificationEndpoint::new();

        let report = service(repository, endpoint)
            .notify_pending(None)
            .await
            .unwrap();

        assert_eq!(report.total(), 0);
        assert_eq!(report.notified(), 0);
    }

    #[tokio::test]
    async fn test_all_records_notified_and_confirmed() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .withf(|restaurant, language, content| {
                *restaurant == Some(5) && language.is_none() && content.is_none()
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![pending(1, Some("PRM-1")), pending(2, Some("PRM-2"))])
            });
        repository
            .expect_confirm_click_notified()
            .times(2)
            .returning(|_, _, _, _| Ok(true));

        let mut endpoint = MockNotificationEndpoint::new();
        endpoint
            .expect_send()
            .withf(|token, n| !token.is_empty() && n.external_code.starts_with("PRM-"))
            .times(2)
            .returning(|_, _| Ok(200));

        let report = service(repository, endpoint)
            .notify_pending(Some(5))
            .await
            .unwrap();

        assert_eq!(report.notified(), 2);
        assert_eq!(report.total(), 2);
    }

    #[tokio::test]
    async fn test_blank_external_code_is_skipped() {
        // The end-to-end example: 3 rows, record 2 has a blank code.
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    pending(1, Some("PRM-1")),
                    pending(2, Some("   ")),
                    pending(3, Some("PRM-3")),
                ])
            });
        repository
            .expect_confirm_click_notified()
            .times(2)
            .returning(|_, _, _, _| Ok(true));

        let mut endpoint = MockNotificationEndpoint::new();
        endpoint.expect_send().times(2).returning(|_, _| Ok(200));

        let report = service(repository, endpoint)
            .notify_pending(Some(5))
            .await
            .unwrap();

        assert_eq!(report.notified(), 2);
        assert_eq!(
            report.outcomes()[1],
            (Some(2), ClickOutcome::Skipped(SkipReason::BlankExternalCode))
        );
    }

    #[tokio::test]
    async fn test_rejected_record_does_not_abort_batch() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    pending(1, Some("PRM-1")),
                    pending(2, Some("PRM-2")),
                    pending(3, Some("PRM-3")),
                ])
            });
        // Only the delivered records reach confirmation.
        repository
            .expect_confirm_click_notified()
            .withf(|_, _, _, click_id| *click_id != 2)
            .times(2)
            .returning(|_, _, _, _| Ok(true));

        let mut endpoint = MockNotificationEndpoint::new();
        endpoint.expect_send().times(3).returning(|_, n| {
            if n.external_code == "PRM-2" {
                Ok(500)
            } else {
                Ok(201)
            }
        });

        let report = service(repository, endpoint)
            .notify_pending(None)
            .await
            .unwrap();

        assert_eq!(report.notified(), 2);
        assert_eq!(report.outcomes()[1], (Some(2), ClickOutcome::Rejected(500)));
        assert_eq!(report.outcomes()[2], (Some(3), ClickOutcome::Notified));
    }

    #[tokio::test]
    async fn test_transport_error_isolated_per_record() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![pending(1, Some("PRM-1")), pending(2, Some("PRM-2"))])
            });
        repository
            .expect_confirm_click_notified()
            .times(1)
            .returning(|_, _, _, _| Ok(true));

        let mut endpoint = MockNotificationEndpoint::new();
        endpoint.expect_send().times(2).returning(|_, n| {
            if n.external_code == "PRM-1" {
                Err(DeliveryError::Transport("connection refused".into()))
            } else {
                Ok(200)
            }
        });

        let report = service(repository, endpoint)
            .notify_pending(None)
            .await
            .unwrap();

        assert_eq!(report.notified(), 1);
        assert_eq!(report.outcomes()[0], (Some(1), ClickOutcome::Failed));
    }

    #[tokio::test]
    async fn test_unconfirmed_delivery_not_counted() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| Ok(vec![pending(1, Some("PRM-1"))]));
        // The row was already notified: no row transitions.
        repository
            .expect_confirm_click_notified()
            .times(1)
            .returning(|_, _, _, _| Ok(false));

        let mut endpoint = MockNotificationEndpoint::new();
        endpoint.expect_send().times(1).returning(|_, _| Ok(200));

        let report = service(repository, endpoint)
            .notify_pending(None)
            .await
            .unwrap();

        assert_eq!(report.notified(), 0);
        assert_eq!(report.outcomes()[0], (Some(1), ClickOutcome::Unconfirmed));
    }

    #[tokio::test]
    async fn test_missing_identifier_is_skipped() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| {
                let mut click = pending(7, Some("PRM-7"));
                click.restaurant_id = None;
                Ok(vec![click])
            });

        let endpoint = MockNotificationEndpoint::new();

        let report = service(repository, endpoint)
            .notify_pending(None)
            .await
            .unwrap();

        assert_eq!(report.notified(), 0);
        assert_eq!(
            report.outcomes()[0],
            (
                Some(7),
                ClickOutcome::Skipped(SkipReason::MissingField("restaurant_id"))
            )
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut repository = MockClickRepository::new();
        repository
            .expect_get_unnotified_clicks()
            .times(1)
            .returning(|_, _, _| {
                Err(AppError::internal("Database error", json!({})))
            });

        let endpoint = MockNotificationEndpoint::new();

        let result = service(repository, endpoint).notify_pending(None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
