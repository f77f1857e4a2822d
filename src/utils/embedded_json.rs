//! In-place expansion of JSON-encoded string fields.
//!
//! SQL JSON-aggregation expressions sometimes serialize nested sub-documents
//! as strings instead of native objects or arrays, so a field like
//! `"contents"` can arrive as `"[{...}]"` (a string) rather than `[{...}]`.
//! Expanding these fields up front keeps the rest of the pipeline
//! single-shaped.

use serde_json::Value;
use tracing::warn;

/// Re-parses string-typed fields of a JSON object in place.
///
/// For each name in `fields`, if the value on `doc` is a string, it is parsed
/// as JSON and replaced with the parsed value. Fields that are already native
/// objects or arrays, absent, or null are left unchanged, which makes the
/// operation idempotent.
///
/// A string that fails to parse is logged and left as-is; callers must treat
/// a still-string field after expansion as unmapped. The rest of the document
/// is never touched.
pub fn expand_embedded_fields(doc: &mut Value, fields: &[&str]) {
    let Some(obj) = doc.as_object_mut() else {
        return;
    };

    for &field in fields {
        let Some(value) = obj.get(field) else {
            continue;
        };

        let Some(raw) = value.as_str() else {
            continue;
        };

        if raw.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => {
                obj.insert(field.to_string(), parsed);
            }
            Err(e) => {
                warn!("Field '{}' holds unparseable embedded JSON: {}", field, e);
            }
        }
    }
}
