//! Promotional content entities for a restaurant.

use serde::{Deserialize, Serialize};

/// One promotional content item attached to a restaurant.
///
/// Mirrors the document produced by the promotions stored procedure. Validity
/// dates stay as nullable ISO date strings; `active` is computed on the SQL
/// side from those dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionContent {
    pub content_id: i32,
    /// Branch the content applies to; `None` means restaurant-wide.
    pub branch_id: Option<i32>,
    pub branch_name: Option<String>,
    pub language_id: Option<i32>,
    pub language_code: Option<String>,
    pub language_name: Option<String>,
    /// Original promotional text or payload.
    pub promo_text: Option<String>,
    /// Final version prepared for publication; may differ from `promo_text`.
    pub publish_text: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub image_url: Option<String>,
    pub click_cost: Option<f64>,
    /// External code the restaurant uses to identify this content.
    pub external_code: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// A restaurant and its promotional content list, as one document.
///
/// The `contents` field can arrive double-encoded from the stored procedure
/// and is expanded before this type is mapped; a list that stays unparseable
/// maps to an empty vec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantPromotions {
    pub restaurant_id: i32,
    pub trade_name: Option<String>,
    #[serde(default)]
    pub contents: Vec<PromotionContent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restaurant_document_with_contents() {
        let doc = json!({
            "restaurant_id": 1,
            "trade_name": "Trattoria Prova",
            "contents": [{
                "content_id": 7,
                "branch_id": null,
                "branch_name": null,
                "language_id": 1,
                "language_code": "es",
                "language_name": "Español",
                "promo_text": "2x1 en pastas",
                "publish_text": "2x1 en pastas — solo hoy",
                "valid_from": "2025-01-01",
                "valid_until": null,
                "image_url": "/img/pastas.png",
                "click_cost": 1.5,
                "external_code": "PRM-0007",
                "active": true
            }]
        });

        let parsed: RestaurantPromotions = serde_json::from_value(doc).unwrap();

        assert_eq!(parsed.restaurant_id, 1);
        assert_eq!(parsed.contents.len(), 1);
        assert_eq!(parsed.contents[0].content_id, 7);
        assert!(parsed.contents[0].active);
        assert!(parsed.contents[0].valid_until.is_none());
    }

    #[test]
    fn test_restaurant_document_without_contents() {
        let doc = json!({
            "restaurant_id": 2,
            "trade_name": null
        });

        let parsed: RestaurantPromotions = serde_json::from_value(doc).unwrap();

        assert!(parsed.contents.is_empty());
        assert!(parsed.trade_name.is_none());
    }

    #[test]
    fn test_content_active_defaults_to_false() {
        let doc = json!({"content_id": 3});

        let parsed: PromotionContent = serde_json::from_value(doc).unwrap();

        assert!(!parsed.active);
        assert!(parsed.external_code.is_none());
    }
}
