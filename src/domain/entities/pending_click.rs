//! Pending click entity: a recorded click awaiting external notification.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A click event that has not yet been notified to the restaurant's
/// billing endpoint.
///
/// Rows arrive from a JSON-returning stored procedure, so every identifier
/// is optional at this boundary; [`PendingClick::notifiable`] proves the
/// required fields present before a notification is attempted.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingClick {
    pub restaurant_id: Option<i32>,
    pub language_id: Option<i32>,
    pub content_id: Option<i32>,
    pub click_id: Option<i32>,
    pub registered_at: Option<NaiveDateTime>,
    /// `None` means the click was recorded anonymously.
    pub customer_id: Option<i32>,
    pub click_cost: Option<f64>,
    /// External content code the restaurant bills against. A click without
    /// one cannot be notified.
    pub external_code: Option<String>,
    /// The backing store keeps this as 0/1; both encodings are accepted.
    #[serde(default, deserialize_with = "bool_from_int_or_bool")]
    pub notified: bool,
}

impl PendingClick {
    /// Validates the fields required for an outbound notification.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] explaining why this record cannot be
    /// notified: a missing identifier, or an absent/blank external code.
    pub fn notifiable(&self) -> Result<NotifiableClick<'_>, SkipReason> {
        let restaurant_id = self
            .restaurant_id
            .ok_or(SkipReason::MissingField("restaurant_id"))?;
        let content_id = self
            .content_id
            .ok_or(SkipReason::MissingField("content_id"))?;
        let click_id = self.click_id.ok_or(SkipReason::MissingField("click_id"))?;

        let external_code = match self.external_code.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => return Err(SkipReason::BlankExternalCode),
        };

        Ok(NotifiableClick {
            restaurant_id,
            language_id: self.language_id,
            content_id,
            click_id,
            external_code,
            click_cost: self.click_cost.unwrap_or(0.0),
        })
    }
}

/// A validated view of a [`PendingClick`] with the notification-required
/// fields proven present.
#[derive(Debug, Clone, Copy)]
pub struct NotifiableClick<'a> {
    pub restaurant_id: i32,
    pub language_id: Option<i32>,
    pub content_id: i32,
    pub click_id: i32,
    pub external_code: &'a str,
    pub click_cost: f64,
}

/// Why a pending click was skipped instead of notified.
///
/// Skipped records count toward neither successes nor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A required identifier key was missing from the gateway row.
    MissingField(&'static str),
    /// The external content code was absent or blank.
    BlankExternalCode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing required field '{}'", name),
            Self::BlankExternalCode => write!(f, "external content code absent or blank"),
        }
    }
}

/// Accepts both native booleans and the 0/1 integers the store emits.
fn bool_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Bool(bool),
        Int(i64),
    }

    match Option::<IntOrBool>::deserialize(deserializer)? {
        Some(IntOrBool::Bool(b)) => Ok(b),
        Some(IntOrBool::Int(i)) => Ok(i != 0),
        None => Ok(false),
    }
}
