//! Access control: bearer-token authentication and role gating.
//!
//! Both steps are plain functions over header text and identities, so the
//! HTTP extractors stay thin and the rules are testable without a server.

use tracing::debug;

use super::ports::TokenService;
use super::{Error, Identity, Role};

/// Scheme prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

pub const NO_TOKEN_MESSAGE: &str = "No token";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

/// Extract the token from an `Authorization` header value.
///
/// # Examples
/// ```
/// use carebook::domain::access::bearer_token;
///
/// assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
/// assert_eq!(bearer_token(Some("Basic abc")), None);
/// assert_eq!(bearer_token(Some("Bearer ")), None);
/// assert_eq!(bearer_token(None), None);
/// ```
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's identity from an `Authorization` header value.
///
/// A missing header, another scheme or an empty token yields
/// `401 No token`; a token the service rejects yields `401 Invalid token`.
pub fn authenticate(
    tokens: &dyn TokenService,
    authorization: Option<&str>,
) -> Result<Identity, Error> {
    let token = bearer_token(authorization).ok_or_else(|| Error::unauthorized(NO_TOKEN_MESSAGE))?;
    tokens.verify(token).map_err(|error| {
        debug!(%error, "bearer token rejected");
        Error::unauthorized(INVALID_TOKEN_MESSAGE)
    })
}

/// Pass the identity through when it holds `required`, else `403`.
pub fn require_role(identity: Identity, required: Role) -> Result<Identity, Error> {
    if identity.role() == required {
        Ok(identity)
    } else {
        debug!(
            user_id = %identity.user_id(),
            role = %identity.role(),
            required = %required,
            "role gate refused request"
        );
        Err(Error::forbidden(FORBIDDEN_MESSAGE))
    }
}
