//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::promotion_service::PromotionService`] - Promotion document lookups with caching
//! - [`services::click_service::ClickService`] - Click registration
//! - [`services::notification_service::NotificationService`] - Relay of unconfirmed clicks
//! - [`services::token_service::TokenService`] - Outbound bearer token minting and caching

pub mod services;
