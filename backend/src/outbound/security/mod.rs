//! Credential adapters: password hashing and bearer token signing.

mod argon2_password_hasher;
mod jwt_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{JwtTokenService, TOKEN_TTL_DAYS};
