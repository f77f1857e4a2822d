//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod clicks;
pub mod health;
pub mod notify;
pub mod promotions;

pub use clicks::{content_click_handler, register_click_handler};
pub use health::health_handler;
pub use notify::notify_clicks_handler;
pub use promotions::{promotion_contents_handler, promotions_handler, restaurant_detail_handler};
