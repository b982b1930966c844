//! Credential store port: persisted accounts and their password hashes.
use async_trait::async_trait;

use crate::domain::{NewUser, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already taken (unique constraint).
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; the store assigns the id and creation time.
    async fn create(&self, user: &NewUser) -> Result<UserAccount, UserPersistenceError>;

    /// Fetch an account by its exact (trimmed) username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Remove an account and, by cascade, everything it owns.
    ///
    /// Returns `false` when no account had the id.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
