//! Argon2id adapter for the [`PasswordHasher`] port.
//!
//! Hashes are stored as PHC strings, which carry the algorithm, parameters
//! and salt, so verification works across parameter changes.

use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Salted Argon2id password hasher.
///
/// # Examples
/// ```
/// use carebook::domain::ports::PasswordHasher;
/// use carebook::outbound::security::Argon2PasswordHasher;
///
/// let hasher = Argon2PasswordHasher::default();
/// let hash = hasher.hash("pw123").expect("hash");
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(hasher.verify("pw123", &hash).expect("verify"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters instead of the library defaults
    /// (19 MiB memory, two passes, one lane).
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}
