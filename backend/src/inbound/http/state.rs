//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on
//! domain ports, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, BookingRepository, CareBookingCommand, CareBookingQuery, PasswordHasher,
    ProviderQueue, TokenService, UserRepository,
};
use crate::domain::{AccountServiceImpl, CareBookingService, ProviderQueueService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub bookings: Arc<dyn CareBookingCommand>,
    pub bookings_query: Arc<dyn CareBookingQuery>,
    pub provider_queue: Arc<dyn ProviderQueue>,
    /// Verifier used by the bearer-token extractors.
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Wire the domain services over a pair of repositories.
    ///
    /// The same store may back both ports, as the in-memory store does.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use carebook::inbound::http::state::HttpState;
    /// use carebook::outbound::memory::InMemoryStore;
    /// use carebook::outbound::security::{Argon2PasswordHasher, JwtTokenService};
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryStore::new(clock.clone()));
    /// let state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store,
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef", clock)),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_repositories<U, B>(
        users: Arc<U>,
        bookings: Arc<B>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self
    where
        U: UserRepository + 'static,
        B: BookingRepository + 'static,
    {
        let care = Arc::new(CareBookingService::new(Arc::clone(&bookings)));
        Self {
            accounts: Arc::new(AccountServiceImpl::new(users, hasher, Arc::clone(&tokens))),
            bookings: care.clone(),
            bookings_query: care,
            provider_queue: Arc::new(ProviderQueueService::new(bookings)),
            tokens,
        }
    }
}
