//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the
//! core concepts of the promotion backend. Entities are plain data structures
//! without business logic.
//!
//! # Entity Types
//!
//! - [`PendingClick`] - A click event awaiting external notification
//! - [`PromotionContent`] / [`RestaurantPromotions`] - Promotional content documents
//!
//! # Boundary Pattern
//!
//! Gateway rows arrive as JSON documents, so [`PendingClick`] keeps every
//! identifier optional; [`NotifiableClick`] is the validated view with the
//! notification-required fields proven present.

pub mod pending_click;
pub mod promotion;

pub use pending_click::{NotifiableClick, PendingClick, SkipReason};
pub use promotion::{PromotionContent, RestaurantPromotions};
