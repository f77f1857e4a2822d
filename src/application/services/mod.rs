//! Business logic services for the application layer.

pub mod click_service;
pub mod notification_service;
pub mod promotion_service;
pub mod token_service;

pub use click_service::ClickService;
pub use notification_service::{ClickOutcome, NotificationService, NotifyReport};
pub use promotion_service::PromotionService;
pub use token_service::{MintError, TOKEN_SAFETY_MARGIN_SECS, TokenService, mint};
