//! Ambulance dispatch bookings priced by distance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::booking_validation::non_blank;
use super::pricing::{AMBULANCE_RATE_PER_KM, total_for_quantity};
use super::{BookingValidationError, UserId};

/// Validated, priced ambulance booking ready to persist.
///
/// # Examples
/// ```
/// use carebook::domain::AmbulanceBookingDraft;
///
/// let draft = AmbulanceBookingDraft::try_from_parts(Some(4.5), Some("X")).unwrap();
/// assert_eq!(draft.total(), 225);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AmbulanceBookingDraft {
    distance_km: f64,
    pickup_address: String,
    rate_per_km: i64,
    total: i64,
}

impl AmbulanceBookingDraft {
    /// Validate distance and pickup address and compute the total.
    pub fn try_from_parts(
        distance_km: Option<f64>,
        pickup_address: Option<&str>,
    ) -> Result<Self, BookingValidationError> {
        let (Some(distance_km), Some(pickup_address)) = (
            distance_km.filter(|d| d.is_finite() && *d > 0.0),
            non_blank(pickup_address),
        ) else {
            return Err(BookingValidationError::AmbulanceBookingIncomplete);
        };
        let total = total_for_quantity(AMBULANCE_RATE_PER_KM, distance_km)
            .ok_or(BookingValidationError::TotalOutOfRange)?;
        Ok(Self {
            distance_km,
            pickup_address,
            rate_per_km: AMBULANCE_RATE_PER_KM,
            total,
        })
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn pickup_address(&self) -> &str {
        &self.pickup_address
    }

    pub fn rate_per_km(&self) -> i64 {
        self.rate_per_km
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

/// Persisted ambulance booking row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AmbulanceBooking {
    pub id: i64,
    pub user_id: UserId,
    pub distance_km: f64,
    pub pickup_address: String,
    pub rate_per_km: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}
