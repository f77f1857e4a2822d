//! Click registration service.

use std::sync::Arc;

use crate::domain::repositories::{ClickRepository, RegisterClick};
use crate::error::AppError;
use serde_json::json;

/// Service for registering clicks against promotional content.
///
/// Registration is the producer side of the notification pipeline: every
/// registered click starts unnotified and is later picked up by the
/// notification service.
pub struct ClickService<R: ClickRepository> {
    repository: Arc<R>,
}

impl<R: ClickRepository> ClickService<R> {
    /// Creates a new click service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a click and returns the registration document from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the content id is not positive.
    /// Returns [`AppError::NotFound`] if the content does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_click(
        &self,
        request: RegisterClick,
    ) -> Result<serde_json::Value, AppError> {
        if request.content_id <= 0 {
            return Err(AppError::bad_request(
                "content_id must be positive",
                json!({ "content_id": request.content_id }),
            ));
        }

        self.repository.register_click(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_click_success() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_register_click()
            .withf(|request| request.content_id == 12 && request.restaurant_id.is_none())
            .times(1)
            .returning(|_| Ok(json!({"click": {"click_id": 1001}})));

        let service = ClickService::new(Arc::new(mock_repo));

        let result = service
            .register_click(RegisterClick::for_content(12))
            .await
            .unwrap();

        assert_eq!(result["click"]["click_id"], 1001);
    }

    #[tokio::test]
    async fn test_register_click_rejects_non_positive_content() {
        let mock_repo = MockClickRepository::new();
        let service = ClickService::new(Arc::new(mock_repo));

        let result = service.register_click(RegisterClick::for_content(0)).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
