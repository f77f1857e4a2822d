//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits over JSON-returning
//! stored procedures. Result documents are reassembled from fragmented rows
//! and expanded before mapping; see [`crate::utils`].
//!
//! # Repositories
//!
//! - [`PgClickRepository`] - Click state: unnotified fetch, confirmation, registration
//! - [`PgPromotionRepository`] - Promotion and restaurant detail documents

pub mod pg_click_repository;
pub mod pg_promotion_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_promotion_repository::PgPromotionRepository;
