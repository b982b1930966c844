//! Account registration and login.
//!
//! Composes the credential store, the password hasher and the token signer
//! behind the [`AccountService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, TokenError, TokenService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{AuthSession, Error, LoginCredentials, NewUser, Registration, TraceId, User};

pub const USERNAME_TAKEN_MESSAGE: &str = "Username already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::conflict(USERNAME_TAKEN_MESSAGE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Run CPU-heavy password work off the async worker, keeping the trace id.
async fn run_blocking<T, F>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    let handle = tokio::task::spawn_blocking(work);
    let joined = match trace_id {
        Some(id) => TraceId::scope(id, handle).await,
        None => handle.await,
    };
    joined.map_err(|err| Error::internal(format!("password task failed: {err}")))
}

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountServiceImpl<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<R> AccountServiceImpl<R> {
    /// Create a service over the given store, hasher and token signer.
    pub fn new(users: Arc<R>, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    fn session_for(&self, user: User) -> Result<AuthSession, Error> {
        let token = self.tokens.issue(&user).map_err(map_token_error)?;
        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl<R> AccountService for AccountServiceImpl<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        let username = registration.username();
        let existing = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = run_blocking(move || hasher.hash(&password))
            .await?
            .map_err(map_hash_error)?;

        let account = self
            .users
            .create(&NewUser {
                username: username.clone(),
                role: registration.role(),
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        info!(
            user_id = %account.user.id(),
            role = %account.user.role(),
            "account registered"
        );
        self.session_for(account.user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            return Err(invalid_credentials());
        };

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let stored_hash = account.password_hash.clone();
        let verified = run_blocking(move || hasher.verify(&password, &stored_hash)).await?;

        match verified {
            Ok(true) => self.session_for(account.user),
            Ok(false) => Err(invalid_credentials()),
            Err(error) => {
                warn!(user_id = %account.user.id(), %error, "stored password hash unusable");
                Err(invalid_credentials())
            }
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
