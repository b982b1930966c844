//! Port for issuing and verifying bearer tokens.
//!
//! Tokens are self-contained signed claim sets; verification needs no
//! storage lookup and there is no revocation.

use crate::domain::{Identity, User};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// The claim set could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, forged or expired.
        Rejected { message: String } => "token rejected: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a claim set for `user`.
    fn issue(&self, user: &User) -> Result<String, TokenError>;

    /// Verify a token and return the identity it proves.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
