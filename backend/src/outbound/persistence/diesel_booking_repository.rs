//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Every insert relies on the `user_id` foreign key: a token naming a deleted
//! account surfaces as `MissingOwner` rather than a generic query failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingPersistenceError, BookingRepository};
use crate::domain::{
    Address, AddressDraft, AmbulanceBooking, AmbulanceBookingDraft, GuidanceDraft,
    GuidanceRequest, GuidanceStatus, NurseBooking, NurseBookingDraft, Subscription,
    SubscriptionDraft, UserId,
};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{
    AddressRow, AmbulanceBookingRow, GuidanceRequestRow, NewAddressRow, NewAmbulanceBookingRow,
    NewGuidanceRequestRow, NewNurseBookingRow, NewSubscriptionRow, NurseBookingRow,
    StoredValueError, SubscriptionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    addresses, ambulance_bookings, guidance_requests, nurse_bookings, subscriptions,
};

/// Diesel-backed implementation of the care record store.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingPersistenceError {
    map_basic_pool_error(error, BookingPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingPersistenceError {
    map_basic_diesel_error(
        error,
        BookingPersistenceError::query,
        BookingPersistenceError::connection,
    )
}

/// Like [`map_diesel_error`], but reports a foreign key failure as the
/// owning account having disappeared.
fn map_insert_error(owner: UserId) -> impl Fn(diesel::result::Error) -> BookingPersistenceError {
    move |error| match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => {
            BookingPersistenceError::missing_owner(owner.get())
        }
        _ => map_diesel_error(error),
    }
}

fn map_stored_value_error(error: StoredValueError) -> BookingPersistenceError {
    BookingPersistenceError::query(error.to_string())
}

fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, BookingPersistenceError>
where
    T: TryFrom<R, Error = StoredValueError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(map_stored_value_error))
        .collect()
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert_address(
        &self,
        owner: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAddressRow {
            user_id: owner.get(),
            label: draft.label(),
            line1: draft.line1(),
            city: draft.city(),
            state: draft.state(),
            pincode: draft.pincode(),
        };

        diesel::insert_into(addresses::table)
            .values(&row)
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Address::from)
            .map_err(map_insert_error(owner))
    }

    async fn list_addresses(&self, owner: UserId) -> Result<Vec<Address>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AddressRow> = addresses::table
            .filter(addresses::user_id.eq(owner.get()))
            .order(addresses::id.asc())
            .select(AddressRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn insert_nurse_booking(
        &self,
        owner: UserId,
        draft: &NurseBookingDraft,
    ) -> Result<NurseBooking, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNurseBookingRow {
            user_id: owner.get(),
            area: draft.area(),
            hours: draft.hours(),
            rate_per_hour: draft.rate_per_hour(),
            total: draft.total(),
        };

        diesel::insert_into(nurse_bookings::table)
            .values(&row)
            .returning(NurseBookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(NurseBooking::from)
            .map_err(map_insert_error(owner))
    }

    async fn list_nurse_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<NurseBooking>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NurseBookingRow> = nurse_bookings::table
            .filter(nurse_bookings::user_id.eq(owner.get()))
            .order(nurse_bookings::id.desc())
            .select(NurseBookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(NurseBooking::from).collect())
    }

    async fn insert_subscription(
        &self,
        owner: UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSubscriptionRow {
            user_id: owner.get(),
            kind: draft.kind().as_str(),
            days: draft.days(),
            rate_per_day: draft.rate_per_day(),
            total: draft.total(),
        };

        let inserted = diesel::insert_into(subscriptions::table)
            .values(&row)
            .returning(SubscriptionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error(owner))?;

        Subscription::try_from(inserted).map_err(map_stored_value_error)
    }

    async fn list_subscriptions(
        &self,
        owner: UserId,
    ) -> Result<Vec<Subscription>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::user_id.eq(owner.get()))
            .order(subscriptions::id.desc())
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        decode_all(rows)
    }

    async fn insert_ambulance_booking(
        &self,
        owner: UserId,
        draft: &AmbulanceBookingDraft,
    ) -> Result<AmbulanceBooking, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAmbulanceBookingRow {
            user_id: owner.get(),
            distance_km: draft.distance_km(),
            pickup_address: draft.pickup_address(),
            rate_per_km: draft.rate_per_km(),
            total: draft.total(),
        };

        diesel::insert_into(ambulance_bookings::table)
            .values(&row)
            .returning(AmbulanceBookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(AmbulanceBooking::from)
            .map_err(map_insert_error(owner))
    }

    async fn list_ambulance_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<AmbulanceBooking>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AmbulanceBookingRow> = ambulance_bookings::table
            .filter(ambulance_bookings::user_id.eq(owner.get()))
            .order(ambulance_bookings::id.desc())
            .select(AmbulanceBookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(AmbulanceBooking::from).collect())
    }

    async fn insert_guidance_request(
        &self,
        owner: UserId,
        draft: &GuidanceDraft,
    ) -> Result<GuidanceRequest, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGuidanceRequestRow {
            user_id: owner.get(),
            note: draft.note(),
            status: GuidanceStatus::Pending.as_str(),
        };

        let inserted = diesel::insert_into(guidance_requests::table)
            .values(&row)
            .returning(GuidanceRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error(owner))?;

        GuidanceRequest::try_from(inserted).map_err(map_stored_value_error)
    }

    async fn list_guidance_requests(
        &self,
        owner: UserId,
    ) -> Result<Vec<GuidanceRequest>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GuidanceRequestRow> = guidance_requests::table
            .filter(guidance_requests::user_id.eq(owner.get()))
            .order(guidance_requests::id.desc())
            .select(GuidanceRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        decode_all(rows)
    }

    async fn list_pending_guidance(&self) -> Result<Vec<GuidanceRequest>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GuidanceRequestRow> = guidance_requests::table
            .filter(guidance_requests::status.eq(GuidanceStatus::Pending.as_str()))
            .order(guidance_requests::id.desc())
            .select(GuidanceRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        decode_all(rows)
    }

    async fn resolve_guidance(&self, id: i64) -> Result<bool, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(guidance_requests::table.filter(guidance_requests::id.eq(id)))
            .set(guidance_requests::status.eq(GuidanceStatus::Resolved.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
