//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, outbound client construction,
//! and Axum server lifecycle.

use crate::application::services::{
    ClickService, NotificationService, PromotionService, TokenService,
};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::outbound::HttpNotificationEndpoint;
use crate::infrastructure::persistence::{PgClickRepository, PgPromotionRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Redis cache (or NullCache fallback)
/// - Outbound notification client and token service
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - The outbound HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let endpoint = HttpNotificationEndpoint::new(
        config.notify_dest_url.clone(),
        Duration::from_secs(config.notify_http_timeout_seconds),
    )
    .context("Failed to build notification HTTP client")?;

    let tokens = TokenService::new(
        config.notify_jwt_issuer.clone(),
        config.notify_jwt_secret.clone(),
        config.notify_token_ttl_seconds,
    );

    let pool_arc = Arc::new(pool);
    let click_repository = Arc::new(PgClickRepository::new(pool_arc.clone()));
    let promotion_repository = Arc::new(PgPromotionRepository::new(pool_arc.clone()));

    let promotion_service = Arc::new(PromotionService::new(
        promotion_repository,
        cache.clone(),
        config.cache_ttl_seconds,
    ));
    let click_service = Arc::new(ClickService::new(click_repository.clone()));
    let notification_service = Arc::new(NotificationService::new(
        click_repository,
        Arc::new(endpoint),
        tokens,
    ));

    let state = AppState::new(
        promotion_service,
        click_service,
        notification_service,
        pool_arc,
        cache,
    );

    let app = app_router(
        state,
        config.behind_proxy,
        config.cors_allowed_origin.as_deref(),
    );

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
