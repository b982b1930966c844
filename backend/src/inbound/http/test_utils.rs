//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use argon2::Params;
use mockable::DefaultClock;

use crate::domain::ports::{
    MockAccountService, MockCareBookingCommand, MockCareBookingQuery, MockProviderQueue,
    MockTokenService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Signing secret shared by the HTTP tests.
pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret";

/// Argon2id at the smallest cost the library accepts, so registration in
/// tests stays fast.
pub fn fast_hasher() -> Argon2PasswordHasher {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
        .expect("minimum argon2 parameters are valid");
    Argon2PasswordHasher::with_params(params)
}

/// State over a fresh in-memory store with real hashing and signing.
pub fn in_memory_state() -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    web::Data::new(HttpState::from_repositories(
        store.clone(),
        store,
        Arc::new(fast_hasher()),
        Arc::new(JwtTokenService::new(TEST_SECRET, clock)),
    ))
}

/// State whose only live port is `tokens`; the services are mocks with no
/// expectations, so any call into them fails the test.
pub fn state_with_tokens(tokens: MockTokenService) -> web::Data<HttpState> {
    web::Data::new(HttpState {
        accounts: Arc::new(MockAccountService::new()),
        bookings: Arc::new(MockCareBookingCommand::new()),
        bookings_query: Arc::new(MockCareBookingQuery::new()),
        provider_queue: Arc::new(MockProviderQueue::new()),
        tokens: Arc::new(tokens),
    })
}
