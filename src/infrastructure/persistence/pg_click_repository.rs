//! PostgreSQL implementation of the click data gateway.
//!
//! All operations call stored procedures that serialize their result to JSON
//! text. Large documents arrive fragmented across multiple single-column
//! rows (driver column-size limit), and nested sub-documents can arrive
//! double-encoded, so every result goes through reassembly and embedded-JSON
//! expansion before it is mapped.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::entities::PendingClick;
use crate::domain::repositories::{ClickRepository, RegisterClick};
use crate::error::AppError;
use crate::utils::embedded_json::expand_embedded_fields;
use crate::utils::fragments;

/// PostgreSQL repository for click state behind JSON-returning procedures.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn get_unnotified_clicks(
        &self,
        restaurant_id: Option<i32>,
        language_id: Option<i32>,
        content_id: Option<i32>,
    ) -> Result<Vec<PendingClick>, AppError> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT * FROM sp_unnotified_clicks($1, $2, $3)")
                .bind(restaurant_id)
                .bind(language_id)
                .bind(content_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        let document = fragments::assemble(rows);
        Ok(decode_pending_clicks(&document))
    }

    async fn confirm_click_notified(
        &self,
        restaurant_id: i32,
        language_id: Option<i32>,
        content_id: i32,
        click_id: i32,
    ) -> Result<bool, AppError> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT * FROM sp_confirm_click($1, $2, $3, $4)")
                .bind(restaurant_id)
                .bind(language_id)
                .bind(content_id)
                .bind(click_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        let document = fragments::assemble(rows);
        Ok(decode_confirmation(&document))
    }

    async fn register_click(
        &self,
        request: RegisterClick,
    ) -> Result<serde_json::Value, AppError> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT * FROM sp_register_click($1, $2, $3, $4, $5)")
                .bind(request.restaurant_id)
                .bind(request.language_id)
                .bind(request.content_id)
                .bind(request.registered_at)
                .bind(request.customer_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        let document = fragments::assemble(rows);
        if document.trim().is_empty() {
            return Err(AppError::not_found(
                "Content not found",
                serde_json::json!({ "content_id": request.content_id }),
            ));
        }

        let mut parsed: Value = serde_json::from_str(&document).map_err(|e| {
            error!("Unparseable registration document: {}", e);
            AppError::internal(
                "Unparseable registration document",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;

        expand_embedded_fields(&mut parsed, &["click", "content"]);
        Ok(parsed)
    }
}

/// Decodes the unnotified-clicks document into typed rows.
///
/// Empty or malformed documents mean "no data". Each array element carries
/// `click` and `content` sub-documents (possibly double-encoded) that are
/// expanded and merged into one flat record; elements that still fail to map
/// are logged and dropped.
fn decode_pending_clicks(document: &str) -> Vec<PendingClick> {
    if document.trim().is_empty() {
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(e) => {
            error!("Unparseable unnotified-clicks document: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(elements) = parsed else {
        error!("Unnotified-clicks document is not an array");
        return Vec::new();
    };

    let mut clicks = Vec::with_capacity(elements.len());
    for mut element in elements {
        expand_embedded_fields(&mut element, &["click", "content"]);

        match serde_json::from_value::<PendingClick>(merge_row(element)) {
            Ok(click) => clicks.push(click),
            Err(e) => warn!("Dropping unmappable click row: {}", e),
        }
    }
    clicks
}

/// Merges the `click` and `content` sub-objects of one element into a single
/// flat object. Later fields win on key collision.
fn merge_row(mut element: Value) -> Value {
    let mut flat = serde_json::Map::new();

    if let Some(obj) = element.as_object_mut() {
        for field in ["click", "content"] {
            if let Some(Value::Object(sub)) = obj.remove(field) {
                flat.extend(sub);
            }
        }
    }

    Value::Object(flat)
}

/// Decodes the confirmation document `{"updated": n}`.
///
/// `true` iff at least one row transitioned. Empty or unparseable documents
/// are `false` with a warning, never an error.
fn decode_confirmation(document: &str) -> bool {
    if document.trim().is_empty() {
        return false;
    }

    match serde_json::from_str::<Value>(document) {
        Ok(parsed) => parsed
            .get("updated")
            .and_then(Value::as_i64)
            .is_some_and(|n| n > 0),
        Err(e) => {
            warn!("Unparseable confirmation document: {}", e);
            false
        }
    }
}
