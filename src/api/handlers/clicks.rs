//! Handlers for click registration.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::register_click::RegisterClickRequest;
use crate::domain::repositories::RegisterClick;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a click on promotional content.
///
/// # Endpoint
///
/// `POST /api/clicks`
///
/// # Request Body
///
/// ```json
/// {
///   "content_id": 12,
///   "restaurant_id": 5,      // optional, resolved from content when omitted
///   "language_id": 1,        // optional
///   "registered_at": "2025-06-01T13:45:00"  // optional
/// }
/// ```
///
/// # Response
///
/// The registration document produced by the store, with its `click` and
/// `content` sub-documents expanded.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if the content does not exist.
pub async fn register_click_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterClickRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate()?;

    let document = state
        .click_service
        .register_click(payload.into())
        .await?;

    Ok(Json(document))
}

/// Registers an anonymous click identified only by content id.
///
/// # Endpoint
///
/// `POST /api/contents/{content_id}/click`
///
/// Shorthand used by the frontend when it only knows the content id;
/// restaurant and language are resolved by the store.
pub async fn content_click_handler(
    State(state): State<AppState>,
    Path(content_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let document = state
        .click_service
        .register_click(RegisterClick::for_content(content_id))
        .await?;

    Ok(Json(document))
}
