//! PostgreSQL implementation of the promotion repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::entities::RestaurantPromotions;
use crate::domain::repositories::PromotionRepository;
use crate::error::AppError;
use crate::utils::embedded_json::expand_embedded_fields;
use crate::utils::fragments;

/// PostgreSQL repository for promotion documents behind JSON-returning
/// procedures.
pub struct PgPromotionRepository {
    pool: Arc<PgPool>,
}

impl PgPromotionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionRepository for PgPromotionRepository {
    async fn get_promotions(
        &self,
        restaurant_id: i32,
        only_active: Option<bool>,
        branch_id: Option<i32>,
    ) -> Result<Option<RestaurantPromotions>, AppError> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT * FROM sp_restaurant_promotions($1, $2, $3)")
                .bind(restaurant_id)
                .bind(only_active)
                .bind(branch_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        let document = fragments::assemble(rows);
        Ok(decode_promotions(&document))
    }

    async fn get_restaurant_details(
        &self,
        restaurant_id: i32,
        language_id: Option<i32>,
    ) -> Result<Option<serde_json::Value>, AppError> {
        let rows: Vec<Option<String>> =
            sqlx::query_scalar("SELECT * FROM sp_restaurant_detail($1, $2)")
                .bind(restaurant_id)
                .bind(language_id.unwrap_or(1))
                .fetch_all(self.pool.as_ref())
                .await?;

        let document = fragments::assemble(rows);
        if document.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&document) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                error!("Unparseable restaurant detail document: {}", e);
                Ok(None)
            }
        }
    }
}

/// Decodes the restaurant promotions document.
///
/// The `contents` list can arrive double-encoded and is expanded first; a
/// list that stays string-typed after expansion is degraded (warned and
/// dropped) while the rest of the document survives. Empty or malformed
/// documents mean "no data".
fn decode_promotions(document: &str) -> Option<RestaurantPromotions> {
    if document.trim().is_empty() {
        return None;
    }

    let mut parsed: Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(e) => {
            error!("Unparseable promotions document: {}", e);
            return None;
        }
    };

    expand_embedded_fields(&mut parsed, &["contents"]);

    if let Some(obj) = parsed.as_object_mut() {
        if obj.get("contents").is_some_and(Value::is_string) {
            warn!("Promotions document has an unexpandable content list; serving without it");
            obj.remove("contents");
        }
    }

    match serde_json::from_value(parsed) {
        Ok(doc) => Some(doc),
        Err(e) => {
            error!("Unmappable promotions document: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_promotions_native_contents() {
        let document = r#"{
            "restaurant_id": 1,
            "trade_name": "Trattoria Prova",
            "contents": [{"content_id": 7, "external_code": "PRM-0007", "active": true}]
        }"#;

        let doc = decode_promotions(document).unwrap();

        assert_eq!(doc.restaurant_id, 1);
        assert_eq!(doc.contents.len(), 1);
        assert_eq!(doc.contents[0].content_id, 7);
    }

    #[test]
    fn test_decode_promotions_double_encoded_contents() {
        let document = r#"{
            "restaurant_id": 1,
            "trade_name": "Trattoria Prova",
            "contents": "[{\"content_id\":7,\"active\":true}]"
        }"#;

        let doc = decode_promotions(document).unwrap();

        assert_eq!(doc.contents.len(), 1);
        assert!(doc.contents[0].active);
    }

    #[test]
    fn test_decode_promotions_degraded_contents() {
        let document = r#"{
            "restaurant_id": 1,
            "trade_name": "Trattoria Prova",
            "contents": "[{broken"
        }"#;

        let doc = decode_promotions(document).unwrap();

        // The rest of the document survives with an empty list.
        assert_eq!(doc.restaurant_id, 1);
        assert!(doc.contents.is_empty());
    }

    #[test]
    fn test_decode_promotions_empty_and_malformed() {
        assert!(decode_promotions("").is_none());
        assert!(decode_promotions("  ").is_none());
        assert!(decode_promotions("{oops").is_none());
    }
}
