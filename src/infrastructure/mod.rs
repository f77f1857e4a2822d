//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching, and outbound
//! delivery.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`outbound`] - External billing endpoint client

pub mod cache;
pub mod outbound;
pub mod persistence;
