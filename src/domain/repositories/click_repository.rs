//! Repository trait for click tracking and notification state.

use crate::domain::entities::PendingClick;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Input data for registering a new click against promotional content.
///
/// Only the content id is mandatory; restaurant and language are resolved
/// from the content by the backing procedure when omitted, and a missing
/// timestamp is stamped by the database.
#[derive(Debug, Clone)]
pub struct RegisterClick {
    pub restaurant_id: Option<i32>,
    pub language_id: Option<i32>,
    pub content_id: i32,
    pub registered_at: Option<NaiveDateTime>,
    /// `None` registers the click anonymously.
    pub customer_id: Option<i32>,
}

impl RegisterClick {
    /// Creates an anonymous registration for a content id, leaving
    /// restaurant/language resolution and timestamping to the store.
    pub fn for_content(content_id: i32) -> Self {
        Self {
            restaurant_id: None,
            language_id: None,
            content_id,
            registered_at: None,
            customer_id: None,
        }
    }
}

/// Repository interface for the click data gateway.
///
/// Wraps the JSON-returning stored procedures that own all durable click
/// state. The notification pipeline consumes typed [`PendingClick`] rows;
/// this trait is the boundary where raw documents become typed records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Fetches clicks not yet notified to the external endpoint.
    ///
    /// All filters are optional and combine conjunctively. Clicks already
    /// confirmed as notified are never returned. Rows that cannot be mapped
    /// to [`PendingClick`] are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_unnotified_clicks(
        &self,
        restaurant_id: Option<i32>,
        language_id: Option<i32>,
        content_id: Option<i32>,
    ) -> Result<Vec<PendingClick>, AppError>;

    /// Marks a click as notified.
    ///
    /// # Returns
    ///
    /// `true` iff exactly one row transitioned to notified. Confirming an
    /// already-notified click returns `false` without error, which keeps the
    /// operation idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn confirm_click_notified(
        &self,
        restaurant_id: i32,
        language_id: Option<i32>,
        content_id: i32,
        click_id: i32,
    ) -> Result<bool, AppError>;

    /// Registers a new click and returns the registration document
    /// (`click` and `content` sub-documents) produced by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the content does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn register_click(
        &self,
        request: RegisterClick,
    ) -> Result<serde_json::Value, AppError>;
}
