//! End-to-end decoding of stored-procedure result documents:
//! fragment reassembly, embedded-JSON expansion, and entity mapping.

use promo_relay::domain::entities::{PendingClick, RestaurantPromotions};
use promo_relay::utils::embedded_json::expand_embedded_fields;
use promo_relay::utils::fragments::assemble;
use serde_json::Value;

#[test]
fn fragmented_document_reassembles_to_valid_json() {
    let doc = assemble(vec![
        Some("{\"a\":1,".to_string()),
        Some("\"b\":2}".to_string()),
    ]);

    let parsed: Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(parsed["a"], 1);
    assert_eq!(parsed["b"], 2);
}

#[test]
fn promotions_document_split_across_rows_maps_to_entities() {
    // A realistic procedure result: one JSON document fragmented at an
    // arbitrary byte boundary, with the content list double-encoded.
    let fragments = vec![
        Some("{\"restaurant_id\":1,\"trade_name\":\"Trattor".to_string()),
        None,
        Some("ia Prova\",\"contents\":\"[{\\\"content_id\\\":7,".to_string()),
        Some("\\\"external_code\\\":\\\"PRM-0007\\\",\\\"active\\\":true}]\"}".to_string()),
    ];

    let document = assemble(fragments);
    let mut parsed: Value = serde_json::from_str(&document).unwrap();

    assert!(parsed["contents"].is_string());
    expand_embedded_fields(&mut parsed, &["contents"]);
    assert!(parsed["contents"].is_array());

    let mapped: RestaurantPromotions = serde_json::from_value(parsed).unwrap();
    assert_eq!(mapped.restaurant_id, 1);
    assert_eq!(mapped.trade_name.as_deref(), Some("Trattoria Prova"));
    assert_eq!(mapped.contents.len(), 1);
    assert_eq!(mapped.contents[0].external_code.as_deref(), Some("PRM-0007"));
}

#[test]
fn expansion_is_idempotent_on_already_expanded_documents() {
    let mut doc: Value = serde_json::from_str(
        r#"{"contents": "[{\"content_id\": 3}]", "other": {"k": 1}}"#,
    )
    .unwrap();

    expand_embedded_fields(&mut doc, &["contents", "other"]);
    let once = doc.clone();
    expand_embedded_fields(&mut doc, &["contents", "other"]);

    assert_eq!(doc, once);
}

#[test]
fn unparseable_embedded_field_leaves_document_intact() {
    let mut doc: Value =
        serde_json::from_str(r#"{"contents": "{broken", "restaurant_id": 4}"#).unwrap();
    let before = doc.clone();

    expand_embedded_fields(&mut doc, &["contents"]);

    assert_eq!(doc, before);
}

#[test]
fn pending_click_row_maps_from_gateway_document() {
    let click: PendingClick = serde_json::from_str(
        r#"{
            "restaurant_id": 5,
            "language_id": null,
            "content_id": 12,
            "click_id": 1001,
            "registered_at": "2025-06-01T13:45:00",
            "click_cost": 0.75,
            "external_code": "PRM-0012",
            "notified": 0
        }"#,
    )
    .unwrap();

    let view = click.notifiable().unwrap();
    assert_eq!(view.restaurant_id, 5);
    assert!(view.language_id.is_none());
    assert_eq!(view.click_cost, 0.75);
}
