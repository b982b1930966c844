//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Enum-like text columns are decoded here so
//! the repositories only see domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Address, AmbulanceBooking, GuidanceRequest, GuidanceStatus, NurseBooking, Role, Subscription,
    SubscriptionType, User, UserAccount, UserId, Username,
};

use super::schema::{
    addresses, ambulance_bookings, guidance_requests, nurse_bookings, subscriptions, users,
};

/// A stored value the domain does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected value in {column}: {value:?}")]
pub(crate) struct StoredValueError {
    column: &'static str,
    value: String,
}

impl StoredValueError {
    fn new(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = StoredValueError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|_| StoredValueError::new("users.role", row.role.as_str()))?;
        let username = Username::new(&row.username)
            .map_err(|_| StoredValueError::new("users.username", row.username.as_str()))?;
        Ok(Self {
            user: User::new(UserId::new(row.id), username, role, row.created_at),
            password_hash: row.password_hash,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i64,
    pub user_id: i64,
    pub label: Option<String>,
    pub line1: String,
    pub city: String,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            label: row.label,
            line1: row.line1,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub user_id: i64,
    pub label: Option<&'a str>,
    pub line1: &'a str,
    pub city: &'a str,
    pub state: Option<&'a str>,
    pub pincode: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Nurse bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nurse_bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NurseBookingRow {
    pub id: i64,
    pub user_id: i64,
    pub area: String,
    pub hours: i64,
    pub rate_per_hour: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

impl From<NurseBookingRow> for NurseBooking {
    fn from(row: NurseBookingRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            area: row.area,
            hours: row.hours,
            rate_per_hour: row.rate_per_hour,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = nurse_bookings)]
pub(crate) struct NewNurseBookingRow<'a> {
    pub user_id: i64,
    pub area: &'a str,
    pub hours: i64,
    pub rate_per_hour: i64,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriptionRow {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub days: f64,
    pub rate_per_day: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = StoredValueError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<SubscriptionType>()
            .map_err(|_| StoredValueError::new("subscriptions.type", row.kind.as_str()))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            kind,
            days: row.days,
            rate_per_day: row.rate_per_day,
            total: row.total,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow {
    pub user_id: i64,
    pub kind: &'static str,
    pub days: f64,
    pub rate_per_day: i64,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Guidance requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guidance_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuidanceRequestRow {
    pub id: i64,
    pub user_id: i64,
    pub note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<GuidanceRequestRow> for GuidanceRequest {
    type Error = StoredValueError;

    fn try_from(row: GuidanceRequestRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<GuidanceStatus>()
            .map_err(|_| StoredValueError::new("guidance_requests.status", row.status.as_str()))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            note: row.note,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guidance_requests)]
pub(crate) struct NewGuidanceRequestRow<'a> {
    pub user_id: i64,
    pub note: Option<&'a str>,
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Ambulance bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ambulance_bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AmbulanceBookingRow {
    pub id: i64,
    pub user_id: i64,
    pub distance_km: f64,
    pub pickup_address: String,
    pub rate_per_km: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

impl From<AmbulanceBookingRow> for AmbulanceBooking {
    fn from(row: AmbulanceBookingRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            distance_km: row.distance_km,
            pickup_address: row.pickup_address,
            rate_per_km: row.rate_per_km,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ambulance_bookings)]
pub(crate) struct NewAmbulanceBookingRow<'a> {
    pub user_id: i64,
    pub distance_km: f64,
    pub pickup_address: &'a str,
    pub rate_per_km: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn user_row(role: &str) -> UserRow {
        UserRow {
            id: 3,
            username: "alice".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            role: role.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("provider", Role::Provider)]
    fn user_rows_decode_roles(#[case] stored: &str, #[case] expected: Role) {
        let account = UserAccount::try_from(user_row(stored)).expect("decodes");
        assert_eq!(account.user.role(), expected);
        assert_eq!(account.user.id(), UserId::new(3));
    }

    #[test]
    fn unknown_roles_are_reported_with_their_column() {
        let err = UserAccount::try_from(user_row("admin")).expect_err("unknown role");
        assert_eq!(err.to_string(), "unexpected value in users.role: \"admin\"");
    }

    #[test]
    fn unknown_guidance_status_is_rejected() {
        let row = GuidanceRequestRow {
            id: 1,
            user_id: 1,
            note: None,
            status: "closed".to_owned(),
            created_at: Utc::now(),
        };
        assert!(GuidanceRequest::try_from(row).is_err());
    }
}
