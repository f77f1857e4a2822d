//! API route configuration.
//!
//! All API routes are rate limited per client IP; the manual notification
//! trigger uses a stricter bucket because each request can fan out into a
//! batch of outbound HTTP calls.

use crate::api::handlers::{
    content_click_handler, notify_clicks_handler, promotion_contents_handler, promotions_handler,
    register_click_handler, restaurant_detail_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes with their rate limiting layers.
///
/// # Endpoints
///
/// - `GET  /promotions/{restaurant_id}`          - Full promotion document
/// - `GET  /promotions/{restaurant_id}/contents` - Content list only
/// - `GET  /restaurants/{restaurant_id}`         - Nested restaurant detail
/// - `POST /clicks`                              - Register a click (body)
/// - `POST /contents/{content_id}/click`         - Register a click (shorthand)
/// - `POST /manual/notify-clicks`                - Relay pending clicks
///
/// # Arguments
///
/// - `behind_proxy` - selects the proxy-aware client IP extractor for rate
///   limiting; enable only behind a trusted reverse proxy
pub fn api_routes(behind_proxy: bool) -> Router<AppState> {
    let manual = Router::new().route("/manual/notify-clicks", post(notify_clicks_handler));
    let manual = if behind_proxy {
        manual.layer(rate_limit::secure_proxy_layer())
    } else {
        manual.layer(rate_limit::secure_layer())
    };

    let public = Router::new()
        .route("/promotions/{restaurant_id}", get(promotions_handler))
        .route(
            "/promotions/{restaurant_id}/contents",
            get(promotion_contents_handler),
        )
        .route(
            "/restaurants/{restaurant_id}",
            get(restaurant_detail_handler),
        )
        .route("/clicks", post(register_click_handler))
        .route("/contents/{content_id}/click", post(content_click_handler));
    let public = if behind_proxy {
        public.layer(rate_limit::proxy_layer())
    } else {
        public.layer(rate_limit::layer())
    };

    public.merge(manual)
}
