//! DTOs for promotion lookup endpoints.

use serde::Deserialize;

/// Query parameters for promotion lookups.
#[derive(Debug, Deserialize)]
pub struct PromotionsQueryParams {
    /// When `true`, only currently valid content is returned.
    pub only_active: Option<bool>,
    /// Restricts the content list to one branch.
    pub branch_id: Option<i32>,
}

/// Query parameters for the restaurant detail lookup.
#[derive(Debug, Deserialize)]
pub struct RestaurantDetailQueryParams {
    /// Preferred language for the detail document; the store defaults to 1.
    pub language_id: Option<i32>,
}
