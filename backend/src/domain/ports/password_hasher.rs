//! Port for one-way salted password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed (bad parameters, RNG failure).
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt, returning a self-describing string.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
