//! Driving port for listing the care records an account owns.

use async_trait::async_trait;

use crate::domain::{
    Address, AmbulanceBooking, Error, GuidanceRequest, NurseBooking, Subscription, UserId,
};

/// "List own" operations: newest first, addresses in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareBookingQuery: Send + Sync {
    async fn addresses(&self, owner: UserId) -> Result<Vec<Address>, Error>;

    async fn nurse_bookings(&self, owner: UserId) -> Result<Vec<NurseBooking>, Error>;

    async fn subscriptions(&self, owner: UserId) -> Result<Vec<Subscription>, Error>;

    async fn ambulance_bookings(&self, owner: UserId) -> Result<Vec<AmbulanceBooking>, Error>;

    async fn guidance_requests(&self, owner: UserId) -> Result<Vec<GuidanceRequest>, Error>;
}
