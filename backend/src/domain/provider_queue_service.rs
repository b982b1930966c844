//! Provider queue service: the cross-account view of pending guidance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::care_booking_service::map_booking_error;
use crate::domain::ports::{BookingRepository, ProviderQueue};
use crate::domain::{Error, GuidanceRequest};

/// Service implementing the [`ProviderQueue`] driving port.
#[derive(Clone)]
pub struct ProviderQueueService<R> {
    bookings: Arc<R>,
}

impl<R> ProviderQueueService<R> {
    /// Create a new queue service over the booking repository.
    pub fn new(bookings: Arc<R>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl<R> ProviderQueue for ProviderQueueService<R>
where
    R: BookingRepository,
{
    async fn pending_requests(&self) -> Result<Vec<GuidanceRequest>, Error> {
        self.bookings
            .list_pending_guidance()
            .await
            .map_err(map_booking_error)
    }

    async fn resolve(&self, request_id: i64) -> Result<(), Error> {
        let found = self
            .bookings
            .resolve_guidance(request_id)
            .await
            .map_err(map_booking_error)?;
        if found {
            info!(request_id, "guidance request resolved");
        } else {
            debug!(request_id, "resolve ignored unknown guidance request");
        }
        Ok(())
    }
}
