//! Driving port for the provider-facing guidance queue.
//!
//! Role checks happen before these methods are called; implementations do
//! not check ownership.

use async_trait::async_trait;

use crate::domain::{Error, GuidanceRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderQueue: Send + Sync {
    /// Every pending guidance request, newest first.
    async fn pending_requests(&self) -> Result<Vec<GuidanceRequest>, Error>;

    /// Mark a request resolved. Unknown or already-resolved ids succeed
    /// without effect.
    async fn resolve(&self, request_id: i64) -> Result<(), Error>;
}
