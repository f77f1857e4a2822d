//! DTOs for the manual notification trigger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for the manual notification run.
#[derive(Debug, Deserialize)]
pub struct NotifyQueryParams {
    /// Restricts the run to one restaurant's pending clicks.
    pub restaurant_id: Option<i32>,
}

/// Result of a manual notification run.
///
/// Only the success count is exposed; per-record outcomes live in the logs.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub notified: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i32>,

    pub timestamp: DateTime<Utc>,
}
