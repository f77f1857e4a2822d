//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities and repository interfaces independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Notification Flow
//!
//! 1. [`repositories::ClickRepository`] fetches unnotified clicks as typed
//!    [`entities::PendingClick`] rows
//! 2. The notification service validates each row, posts it to the external
//!    billing endpoint, and confirms successful deliveries back through the
//!    repository
//! 3. Confirmed clicks are never re-selected by the fetch operation

pub mod entities;
pub mod repositories;
