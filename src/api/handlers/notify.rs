//! Handler for the manual notification trigger.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::api::dto::notify::{NotifyQueryParams, NotifyResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Relays all pending clicks to their restaurants' billing endpoints.
///
/// # Endpoint
///
/// `POST /api/manual/notify-clicks`
/// `POST /api/manual/notify-clicks?restaurant_id=5`
///
/// Processes only clicks already registered and still unnotified; it never
/// creates new clicks. Each successfully acknowledged click is marked
/// notified in the database.
///
/// # Response
///
/// ```json
/// {
///   "notified": 3,
///   "restaurant_id": 5,
///   "timestamp": "2025-06-01T18:20:01Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 500 Internal Server Error when the pending-click fetch fails or
/// the bearer token cannot be signed; per-record delivery failures are
/// absorbed into the count and logged.
pub async fn notify_clicks_handler(
    State(state): State<AppState>,
    Query(params): Query<NotifyQueryParams>,
) -> Result<Json<NotifyResponse>, AppError> {
    let report = state
        .notification_service
        .notify_pending(params.restaurant_id)
        .await?;

    Ok(Json(NotifyResponse {
        notified: report.notified(),
        restaurant_id: params.restaurant_id,
        timestamp: Utc::now(),
    }))
}
