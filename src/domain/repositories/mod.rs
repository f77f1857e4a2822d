//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ClickRepository`] - Unnotified-click fetch, confirmation, and registration
//! - [`PromotionRepository`] - Promotional content and restaurant detail documents

pub mod click_repository;
pub mod promotion_repository;

pub use click_repository::{ClickRepository, RegisterClick};
pub use promotion_repository::PromotionRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use promotion_repository::MockPromotionRepository;
