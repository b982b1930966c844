//! Port for the care records owned by an account: addresses, nurse
//! bookings, subscriptions, ambulance bookings and guidance requests.
//!
//! Listing methods return rows newest first (descending id), except
//! addresses, which come back in insertion order.
use async_trait::async_trait;

use crate::domain::{
    Address, AddressDraft, AmbulanceBooking, AmbulanceBookingDraft, GuidanceDraft,
    GuidanceRequest, NurseBooking, NurseBookingDraft, Subscription, SubscriptionDraft, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// The owning account does not exist (foreign key).
        MissingOwner { user_id: i64 } => "no account with id {user_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert_address(
        &self,
        owner: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, BookingPersistenceError>;

    async fn list_addresses(&self, owner: UserId) -> Result<Vec<Address>, BookingPersistenceError>;

    async fn insert_nurse_booking(
        &self,
        owner: UserId,
        draft: &NurseBookingDraft,
    ) -> Result<NurseBooking, BookingPersistenceError>;

    async fn list_nurse_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<NurseBooking>, BookingPersistenceError>;

    async fn insert_subscription(
        &self,
        owner: UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, BookingPersistenceError>;

    async fn list_subscriptions(
        &self,
        owner: UserId,
    ) -> Result<Vec<Subscription>, BookingPersistenceError>;

    async fn insert_ambulance_booking(
        &self,
        owner: UserId,
        draft: &AmbulanceBookingDraft,
    ) -> Result<AmbulanceBooking, BookingPersistenceError>;

    async fn list_ambulance_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<AmbulanceBooking>, BookingPersistenceError>;

    async fn insert_guidance_request(
        &self,
        owner: UserId,
        draft: &GuidanceDraft,
    ) -> Result<GuidanceRequest, BookingPersistenceError>;

    async fn list_guidance_requests(
        &self,
        owner: UserId,
    ) -> Result<Vec<GuidanceRequest>, BookingPersistenceError>;

    /// Pending guidance requests across every account.
    async fn list_pending_guidance(&self) -> Result<Vec<GuidanceRequest>, BookingPersistenceError>;

    /// Mark a guidance request resolved.
    ///
    /// Returns `true` when a row with the id exists. Resolving an already
    /// resolved request is allowed and leaves it resolved.
    async fn resolve_guidance(&self, id: i64) -> Result<bool, BookingPersistenceError>;
}
