//! Saved postal addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::booking_validation::non_blank;
use super::{BookingValidationError, UserId};

/// Validated address input.
///
/// ## Invariants
/// - `line1` and `city` are non-blank.
/// - Blank optional fields are stored as `None`.
///
/// # Examples
/// ```
/// use carebook::domain::AddressDraft;
///
/// let draft = AddressDraft::try_from_parts(Some("Home"), Some("12 MG Road"), Some("Bengaluru"), None, Some(""))
///     .expect("valid address");
/// assert_eq!(draft.city(), "Bengaluru");
/// assert_eq!(draft.pincode(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    label: Option<String>,
    line1: String,
    city: String,
    state: Option<String>,
    pincode: Option<String>,
}

impl AddressDraft {
    /// Validate raw address fields.
    pub fn try_from_parts(
        label: Option<&str>,
        line1: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        pincode: Option<&str>,
    ) -> Result<Self, BookingValidationError> {
        let (Some(line1), Some(city)) = (non_blank(line1), non_blank(city)) else {
            return Err(BookingValidationError::AddressIncomplete);
        };
        Ok(Self {
            label: non_blank(label),
            line1,
            city,
            state: non_blank(state),
            pincode: non_blank(pincode),
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn pincode(&self) -> Option<&str> {
        self.pincode.as_deref()
    }
}

/// Persisted address row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: i64,
    pub user_id: UserId,
    pub label: Option<String>,
    pub line1: String,
    pub city: String,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
}
