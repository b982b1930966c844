//! Authentication values: registration and login payloads, the identity
//! carried by a verified token, and the session returned to clients.
//!
//! Constructors validate raw string inputs so handlers can reject bad
//! payloads before talking to a port or service.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Role, User, UserId, Username};

/// Why a registration or login payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Role was missing or not a known role.
    #[error("role must be user or provider")]
    InvalidRole,
}

fn require_password(password: Option<&str>) -> Result<Zeroizing<String>, CredentialsValidationError> {
    match password {
        Some(value) if !value.is_empty() => Ok(Zeroizing::new(value.to_owned())),
        _ => Err(CredentialsValidationError::EmptyPassword),
    }
}

fn require_username(username: Option<&str>) -> Result<Username, CredentialsValidationError> {
    username
        .and_then(|value| Username::new(value).ok())
        .ok_or(CredentialsValidationError::EmptyUsername)
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use carebook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" alice "), Some("pw123")).unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "pw123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from optional raw inputs.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: require_username(username)?,
            password: require_password(password)?,
        })
    }

    /// Username used for the credential lookup.
    pub fn username(&self) -> &str {
        self.username.as_ref()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Construct a registration from optional raw inputs.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let username = require_username(username)?;
        let password = require_password(password)?;
        let role = role
            .and_then(|value| value.parse::<Role>().ok())
            .ok_or(CredentialsValidationError::InvalidRole)?;
        Ok(Self {
            username,
            password,
            role,
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password, hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Identity proven by a verified bearer token.
///
/// Built from the token's claims alone; no storage lookup happens, so an
/// identity outlives account deletion until the token expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    username: String,
    role: Role,
}

impl Identity {
    /// Assemble an identity from verified claims.
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Account that owns records created under this identity.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Username embedded in the token.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Role embedded in the token.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.username().as_ref(), user.role())
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthSession {
    /// Authenticated account.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
}
