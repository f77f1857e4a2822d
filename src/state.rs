//! Shared application state injected into HTTP handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{ClickService, NotificationService, PromotionService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgClickRepository, PgPromotionRepository};

/// Application state shared across all request handlers.
///
/// Services are wired once at startup in [`crate::server::run`]; the pool and
/// cache handles are kept for health checks.
#[derive(Clone)]
pub struct AppState {
    pub promotion_service: Arc<PromotionService<PgPromotionRepository>>,
    pub click_service: Arc<ClickService<PgClickRepository>>,
    pub notification_service: Arc<NotificationService<PgClickRepository>>,
    pub db: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Creates the shared state from wired services.
    pub fn new(
        promotion_service: Arc<PromotionService<PgPromotionRepository>>,
        click_service: Arc<ClickService<PgClickRepository>>,
        notification_service: Arc<NotificationService<PgClickRepository>>,
        db: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            promotion_service,
            click_service,
            notification_service,
            db,
            cache,
        }
    }
}
