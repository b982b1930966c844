//! Wiring of repositories, crypto adapters and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use carebook::domain::ports::{PasswordHasher, TokenService};
use carebook::inbound::http::state::HttpState;
use carebook::outbound::memory::InMemoryStore;
use carebook::outbound::persistence::{DieselBookingRepository, DieselUserRepository};
use carebook::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a process-local store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        config.jwt_secret.as_bytes(),
        Arc::clone(&clock),
    ));

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            HttpState::from_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselBookingRepository::new(pool.clone())),
                hasher,
                tokens,
            )
        }
        None => {
            warn!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new(clock));
            HttpState::from_repositories(Arc::clone(&store), store, hasher, tokens)
        }
    };
    web::Data::new(state)
}
