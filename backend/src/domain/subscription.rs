//! Day and night care subscriptions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pricing::{SUBSCRIPTION_RATE_PER_DAY, total_for_quantity};
use super::{BookingValidationError, UserId};

/// Shift covered by a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Day,
    Night,
}

impl SubscriptionType {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionType {
    type Err = BookingValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(BookingValidationError::SubscriptionIncomplete),
        }
    }
}

/// Validated, priced subscription ready to persist.
///
/// Days may be fractional; the total is rounded to the nearest unit.
///
/// # Examples
/// ```
/// use carebook::domain::{SubscriptionDraft, SubscriptionType};
///
/// let draft = SubscriptionDraft::try_from_parts(Some("night"), Some(5.0)).unwrap();
/// assert_eq!(draft.kind(), SubscriptionType::Night);
/// assert_eq!(draft.total(), 5000);
///
/// let half = SubscriptionDraft::try_from_parts(Some("day"), Some(1.5)).unwrap();
/// assert_eq!(half.total(), 1500);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    kind: SubscriptionType,
    days: f64,
    rate_per_day: i64,
    total: i64,
}

impl SubscriptionDraft {
    /// Validate the plan type and day count and compute the total.
    pub fn try_from_parts(
        kind: Option<&str>,
        days: Option<f64>,
    ) -> Result<Self, BookingValidationError> {
        let kind = kind
            .ok_or(BookingValidationError::SubscriptionIncomplete)?
            .parse::<SubscriptionType>()?;
        let days = days
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(BookingValidationError::SubscriptionIncomplete)?;
        let total = total_for_quantity(SUBSCRIPTION_RATE_PER_DAY, days)
            .ok_or(BookingValidationError::TotalOutOfRange)?;
        Ok(Self {
            kind,
            days,
            rate_per_day: SUBSCRIPTION_RATE_PER_DAY,
            total,
        })
    }

    pub fn kind(&self) -> SubscriptionType {
        self.kind
    }

    pub fn days(&self) -> f64 {
        self.days
    }

    pub fn rate_per_day(&self) -> i64 {
        self.rate_per_day
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

/// Persisted subscription row. `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Subscription {
    pub id: i64,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    pub days: f64,
    pub rate_per_day: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}
