//! Repository trait for promotional content documents.

use crate::domain::entities::RestaurantPromotions;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for restaurant promotion lookups.
///
/// Both operations read JSON documents assembled from fragmented
/// stored-procedure results.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPromotionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Retrieves a restaurant and its promotional content list.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(doc))` when the restaurant exists; a degraded content list
    ///   (unparseable after expansion) maps to an empty vec
    /// - `Ok(None)` when the procedure returns no data
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_promotions(
        &self,
        restaurant_id: i32,
        only_active: Option<bool>,
        branch_id: Option<i32>,
    ) -> Result<Option<RestaurantPromotions>, AppError>;

    /// Retrieves the full nested detail document for a restaurant.
    ///
    /// The document is passed through as-is; language defaults to 1 when
    /// not provided.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_restaurant_details(
        &self,
        restaurant_id: i32,
        language_id: Option<i32>,
    ) -> Result<Option<serde_json::Value>, AppError>;
}
