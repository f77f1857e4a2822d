//! Handlers for promotion lookup endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::promotions::{PromotionsQueryParams, RestaurantDetailQueryParams};
use crate::domain::entities::{PromotionContent, RestaurantPromotions};
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Returns a restaurant's full promotion document.
///
/// # Endpoint
///
/// `GET /api/promotions/{restaurant_id}`
///
/// # Query Parameters
///
/// - `only_active` (optional): restrict to currently valid content
/// - `branch_id` (optional): restrict to one branch
///
/// # Errors
///
/// Returns 404 Not Found when the restaurant has no promotion document.
pub async fn promotions_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    Query(params): Query<PromotionsQueryParams>,
) -> Result<Json<RestaurantPromotions>, AppError> {
    let document = state
        .promotion_service
        .get_promotions(restaurant_id, params.only_active, params.branch_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                "Restaurant not found",
                json!({ "restaurant_id": restaurant_id }),
            )
        })?;

    Ok(Json(document))
}

/// Returns only the content list of a restaurant's promotion document.
///
/// # Endpoint
///
/// `GET /api/promotions/{restaurant_id}/contents`
///
/// An absent or degraded document yields an empty list rather than an error,
/// so frontends can render "no promotions" without special-casing.
pub async fn promotion_contents_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    Query(params): Query<PromotionsQueryParams>,
) -> Result<Json<Vec<PromotionContent>>, AppError> {
    let contents = state
        .promotion_service
        .get_promotions(restaurant_id, params.only_active, params.branch_id)
        .await?
        .map(|document| document.contents)
        .unwrap_or_default();

    Ok(Json(contents))
}

/// Returns the nested detail document for a restaurant.
///
/// # Endpoint
///
/// `GET /api/restaurants/{restaurant_id}?language_id=1`
///
/// # Errors
///
/// Returns 404 Not Found when the restaurant does not exist.
pub async fn restaurant_detail_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    Query(params): Query<RestaurantDetailQueryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let document = state
        .promotion_service
        .get_restaurant_details(restaurant_id, params.language_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                "Restaurant not found",
                json!({ "restaurant_id": restaurant_id }),
            )
        })?;

    Ok(Json(document))
}
