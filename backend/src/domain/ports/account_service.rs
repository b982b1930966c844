//! Driving port for account registration and login.
//!
//! Inbound adapters call this without knowing which credential store,
//! password hasher or token signer backs it.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and sign a token for it.
    ///
    /// Fails with a conflict when the username is taken.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;

    /// Check credentials and sign a token.
    ///
    /// Fails with the same unauthorised error whether the username is unknown
    /// or the password is wrong.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;
}
