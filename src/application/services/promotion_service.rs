//! Promotional content lookups with fail-open caching.

use std::sync::Arc;

use crate::domain::entities::RestaurantPromotions;
use crate::domain::repositories::PromotionRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use tracing::warn;

/// Service for retrieving restaurant promotion documents.
///
/// Successful lookups are cached as serialized JSON; cache failures degrade
/// silently to a database lookup. The notification pipeline never reads this
/// cache.
pub struct PromotionService<R: PromotionRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl<R: PromotionRepository> PromotionService<R> {
    /// Creates a new promotion service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Retrieves a restaurant's promotion document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(doc))` when the restaurant exists
    /// - `Ok(None)` when the store returns no data
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_promotions(
        &self,
        restaurant_id: i32,
        only_active: Option<bool>,
        branch_id: Option<i32>,
    ) -> Result<Option<RestaurantPromotions>, AppError> {
        let cache_key = Self::cache_key(restaurant_id, only_active, branch_id);

        if let Ok(Some(cached)) = self.cache.get_document(&cache_key).await {
            match serde_json::from_str::<RestaurantPromotions>(&cached) {
                Ok(doc) => return Ok(Some(doc)),
                Err(e) => {
                    // Stale or corrupt entry: fall through to the database.
                    warn!("Discarding unparseable cache entry {}: {}", cache_key, e);
                    let _ = self.cache.invalidate(&cache_key).await;
                }
            }
        }

        let document = self
            .repository
            .get_promotions(restaurant_id, only_active, branch_id)
            .await?;

        if let Some(ref doc) = document {
            if let Ok(serialized) = serde_json::to_string(doc) {
                let _ = self
                    .cache
                    .set_document(
                        &cache_key,
                        &serialized,
                        Some(self.cache_ttl_seconds as usize),
                    )
                    .await;
            }
        }

        Ok(document)
    }

    /// Retrieves the nested detail document for a restaurant, uncached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_restaurant_details(
        &self,
        restaurant_id: i32,
        language_id: Option<i32>,
    ) -> Result<Option<serde_json::Value>, AppError> {
        self.repository
            .get_restaurant_details(restaurant_id, language_id)
            .await
    }

    fn cache_key(restaurant_id: i32, only_active: Option<bool>, branch_id: Option<i32>) -> String {
        format!(
            "promotions:{}:{}:{}",
            restaurant_id,
            only_active.map_or_else(|| "all".to_string(), |v| v.to_string()),
            branch_id.map_or_else(|| "all".to_string(), |v| v.to_string()),
        )
    }
}
