//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB, cache (public)
//! - `/api/*`            - REST API (rate limited; manual notify stricter)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **CORS** - Configurable allowed origin for the browser frontend
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing as request_tracing;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `cors_origin` - browser origin allowed by CORS; `None` disables CORS
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    cors_origin: Option<&str>,
) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes(behind_proxy);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors_layer(cors_origin))
        .layer(request_tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Builds the CORS layer for the configured frontend origin.
///
/// Without a configured origin the returned layer emits no CORS headers, so
/// cross-origin browser calls stay blocked by the same-origin policy.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };

    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::AUTHORIZATION,
                header::ORIGIN,
                HeaderName::from_static("x-requested-with"),
            ])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!("Invalid CORS_ALLOWED_ORIGIN '{}', CORS disabled", origin);
            CorsLayer::new()
        }
    }
}
