//! DTOs for click registration.

use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::repositories::RegisterClick;

/// Request to register a click on promotional content.
///
/// Restaurant and language may be omitted; the store resolves them from the
/// content id. Clicks registered through the public API are always anonymous.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterClickRequest {
    pub restaurant_id: Option<i32>,
    pub language_id: Option<i32>,

    #[validate(range(min = 1, message = "content_id must be positive"))]
    pub content_id: i32,

    /// Click timestamp; the store stamps the current time when omitted.
    pub registered_at: Option<NaiveDateTime>,
}

impl From<RegisterClickRequest> for RegisterClick {
    fn from(request: RegisterClickRequest) -> Self {
        Self {
            restaurant_id: request.restaurant_id,
            language_id: request.language_id,
            content_id: request.content_id,
            registered_at: request.registered_at,
            customer_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_minimal_body() {
        let request: RegisterClickRequest =
            serde_json::from_str(r#"{"content_id": 12}"#).unwrap();

        assert!(request.validate().is_ok());

        let register: RegisterClick = request.into();
        assert_eq!(register.content_id, 12);
        assert!(register.restaurant_id.is_none());
        assert!(register.customer_id.is_none());
    }

    #[test]
    fn test_register_request_rejects_non_positive_content() {
        let request: RegisterClickRequest =
            serde_json::from_str(r#"{"content_id": 0}"#).unwrap();

        assert!(request.validate().is_err());
    }
}
