//! Outbound integration with restaurant billing endpoints.
//!
//! Provides a [`NotificationEndpoint`] trait with a reqwest-backed
//! implementation:
//! - [`HttpNotificationEndpoint`] - Production HTTP client with bounded timeout
//! - Test mocks available with `cfg(test)`

mod endpoint;
mod http_endpoint;

pub use endpoint::{ClickNotification, DeliveryError, NotificationEndpoint};
pub use http_endpoint::HttpNotificationEndpoint;

#[cfg(test)]
pub use endpoint::MockNotificationEndpoint;
