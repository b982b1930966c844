//! Driving port for creating care records on behalf of an account.

use async_trait::async_trait;

use crate::domain::{
    Address, AddressDraft, AmbulanceBooking, AmbulanceBookingDraft, Error, GuidanceDraft,
    GuidanceRequest, NurseBooking, NurseBookingDraft, Subscription, SubscriptionDraft, UserId,
};

/// Create operations. Drafts arrive validated and priced; implementations
/// persist them under `owner` and return the stored row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareBookingCommand: Send + Sync {
    async fn add_address(&self, owner: UserId, draft: &AddressDraft) -> Result<Address, Error>;

    async fn book_nurse(
        &self,
        owner: UserId,
        draft: &NurseBookingDraft,
    ) -> Result<NurseBooking, Error>;

    async fn subscribe(
        &self,
        owner: UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, Error>;

    async fn book_ambulance(
        &self,
        owner: UserId,
        draft: &AmbulanceBookingDraft,
    ) -> Result<AmbulanceBooking, Error>;

    async fn request_guidance(
        &self,
        owner: UserId,
        draft: &GuidanceDraft,
    ) -> Result<GuidanceRequest, Error>;
}
