//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching serialized promotion documents.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures should degrade to database lookups).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a serialized document from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(doc))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    ///
    /// # Errors
    ///
    /// Should not return errors in production implementations. Errors are logged
    /// and treated as cache misses.
    async fn get_document(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a serialized document in cache with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `key` - The cache key
    /// - `document` - The serialized JSON document to cache
    /// - `ttl_seconds` - Optional TTL in seconds (implementation-specific default if None)
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set_document(
        &self,
        key: &str,
        document: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Removes a cached document.
    ///
    /// Used when the underlying content changes.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
