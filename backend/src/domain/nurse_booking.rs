//! Nurse hire bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::booking_validation::non_blank;
use super::pricing::{NURSE_RATE_PER_HOUR, total_for_units};
use super::{BookingValidationError, UserId};

/// Validated, priced nurse booking ready to persist.
///
/// # Examples
/// ```
/// use carebook::domain::NurseBookingDraft;
///
/// let draft = NurseBookingDraft::try_from_parts(Some("Koramangala"), Some(3)).unwrap();
/// assert_eq!(draft.rate_per_hour(), 200);
/// assert_eq!(draft.total(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseBookingDraft {
    area: String,
    hours: i64,
    rate_per_hour: i64,
    total: i64,
}

impl NurseBookingDraft {
    /// Validate the area and hours and compute the total.
    pub fn try_from_parts(
        area: Option<&str>,
        hours: Option<i64>,
    ) -> Result<Self, BookingValidationError> {
        let (Some(area), Some(hours)) = (non_blank(area), hours.filter(|h| *h > 0)) else {
            return Err(BookingValidationError::NurseBookingIncomplete);
        };
        let total = total_for_units(NURSE_RATE_PER_HOUR, hours)
            .ok_or(BookingValidationError::TotalOutOfRange)?;
        Ok(Self {
            area,
            hours,
            rate_per_hour: NURSE_RATE_PER_HOUR,
            total,
        })
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn rate_per_hour(&self) -> i64 {
        self.rate_per_hour
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

/// Persisted nurse booking row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NurseBooking {
    pub id: i64,
    pub user_id: UserId,
    pub area: String,
    pub hours: i64,
    pub rate_per_hour: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}
