//! Care booking domain services.
//!
//! These services implement the care booking driving ports on top of a
//! [`BookingRepository`]. Drafts arrive validated and priced, so the
//! services only persist, list and translate repository failures.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    BookingPersistenceError, BookingRepository, CareBookingCommand, CareBookingQuery,
};
use crate::domain::{
    Address, AddressDraft, AmbulanceBooking, AmbulanceBookingDraft, Error, GuidanceDraft,
    GuidanceRequest, NurseBooking, NurseBookingDraft, Subscription, SubscriptionDraft, UserId,
};

/// Message returned when a token outlives the account it names.
pub const MISSING_ACCOUNT_MESSAGE: &str = "account no longer exists";

pub(crate) fn map_booking_error(error: BookingPersistenceError) -> Error {
    match error {
        BookingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingPersistenceError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingPersistenceError::MissingOwner { .. } => {
            Error::unauthorized(MISSING_ACCOUNT_MESSAGE)
        }
    }
}

/// Care booking service implementing the command and query driving ports.
#[derive(Clone)]
pub struct CareBookingService<R> {
    bookings: Arc<R>,
}

impl<R> CareBookingService<R> {
    /// Create a new service over the booking repository.
    pub fn new(bookings: Arc<R>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl<R> CareBookingCommand for CareBookingService<R>
where
    R: BookingRepository,
{
    async fn add_address(&self, owner: UserId, draft: &AddressDraft) -> Result<Address, Error> {
        self.bookings
            .insert_address(owner, draft)
            .await
            .map_err(map_booking_error)
    }

    async fn book_nurse(
        &self,
        owner: UserId,
        draft: &NurseBookingDraft,
    ) -> Result<NurseBooking, Error> {
        let booking = self
            .bookings
            .insert_nurse_booking(owner, draft)
            .await
            .map_err(map_booking_error)?;
        info!(user_id = %owner, booking_id = booking.id, total = booking.total, "nurse booked");
        Ok(booking)
    }

    async fn subscribe(
        &self,
        owner: UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, Error> {
        let subscription = self
            .bookings
            .insert_subscription(owner, draft)
            .await
            .map_err(map_booking_error)?;
        info!(
            user_id = %owner,
            subscription_id = subscription.id,
            kind = %subscription.kind,
            total = subscription.total,
            "subscription created"
        );
        Ok(subscription)
    }

    async fn book_ambulance(
        &self,
        owner: UserId,
        draft: &AmbulanceBookingDraft,
    ) -> Result<AmbulanceBooking, Error> {
        let booking = self
            .bookings
            .insert_ambulance_booking(owner, draft)
            .await
            .map_err(map_booking_error)?;
        info!(user_id = %owner, booking_id = booking.id, total = booking.total, "ambulance booked");
        Ok(booking)
    }

    async fn request_guidance(
        &self,
        owner: UserId,
        draft: &GuidanceDraft,
    ) -> Result<GuidanceRequest, Error> {
        let request = self
            .bookings
            .insert_guidance_request(owner, draft)
            .await
            .map_err(map_booking_error)?;
        info!(user_id = %owner, request_id = request.id, "guidance requested");
        Ok(request)
    }
}

#[async_trait]
impl<R> CareBookingQuery for CareBookingService<R>
where
    R: BookingRepository,
{
    async fn addresses(&self, owner: UserId) -> Result<Vec<Address>, Error> {
        self.bookings
            .list_addresses(owner)
            .await
            .map_err(map_booking_error)
    }

    async fn nurse_bookings(&self, owner: UserId) -> Result<Vec<NurseBooking>, Error> {
        self.bookings
            .list_nurse_bookings(owner)
            .await
            .map_err(map_booking_error)
    }

    async fn subscriptions(&self, owner: UserId) -> Result<Vec<Subscription>, Error> {
        self.bookings
            .list_subscriptions(owner)
            .await
            .map_err(map_booking_error)
    }

    async fn ambulance_bookings(&self, owner: UserId) -> Result<Vec<AmbulanceBooking>, Error> {
        self.bookings
            .list_ambulance_bookings(owner)
            .await
            .map_err(map_booking_error)
    }

    async fn guidance_requests(&self, owner: UserId) -> Result<Vec<GuidanceRequest>, Error> {
        self.bookings
            .list_guidance_requests(owner)
            .await
            .map_err(map_booking_error)
    }
}

#[cfg(test)]
#[path = "care_booking_service_tests.rs"]
mod tests;
