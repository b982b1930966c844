//! HS256 JWT adapter for the [`TokenService`] port.
//!
//! Tokens carry `{id, role, username, iat, exp}` and expire seven days after
//! issue. Expiry is checked against the injected clock rather than the
//! system time so lifetimes are testable.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{Identity, Role, User, UserId};

/// Lifetime of an issued token, in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

fn token_ttl() -> TimeDelta {
    TimeDelta::days(TOKEN_TTL_DAYS)
}

/// Signed claim set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    id: i64,
    role: Role,
    username: String,
    iat: i64,
    exp: i64,
}

/// Token signer and verifier sharing one process-wide secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            id: user.id().get(),
            role: user.role(),
            username: user.username().to_string(),
            iat: now.timestamp(),
            exp: (now + token_ttl()).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::rejected(err.to_string()))?
            .claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::rejected("token expired"));
        }
        Ok(Identity::new(
            UserId::new(claims.id),
            claims.username,
            claims.role,
        ))
    }
}
