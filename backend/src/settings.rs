//! Application settings parsed from the environment.
//!
//! Variables are read through [`mockable::Env`] so parsing is testable
//! without touching the process environment. Debug builds tolerate missing
//! or malformed values with a warning; release builds reject them.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use mockable::Env;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::persistence::DEFAULT_MAX_SIZE;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "HOST";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DB_POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";

/// Minimum signing secret length accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;
/// Length of the throwaway secret generated for debug builds.
pub const EPHEMERAL_JWT_SECRET_LEN: usize = 64;
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require explicit, valid configuration.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    /// ```
    /// use carebook::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AppConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short for release builds.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Validated process configuration.
pub struct AppSettings {
    /// HS256 signing secret, wiped from memory on drop.
    pub jwt_secret: Zeroizing<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_max_size: u32,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("jwt_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_pool_max_size", &self.db_pool_max_size)
            .finish()
    }
}

impl AppSettings {
    /// Build settings from environment variables and build mode.
    ///
    /// # Examples
    /// ```
    /// use carebook::settings::{AppSettings, BuildMode};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
    ///     "PORT" => Some("8088".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    /// assert_eq!(settings.bind_addr.port(), 8088);
    /// assert!(settings.database_url.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError`] in release builds when the secret is
    /// missing or short, or when any value fails to parse.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, AppConfigError> {
        let jwt_secret = jwt_secret_from_env(env, mode)?;
        let port = parsed_or_default(env, mode, PORT_ENV, DEFAULT_PORT, "a port number")?;
        let host = parsed_or_default(env, mode, HOST_ENV, DEFAULT_HOST, "an IP address")?;
        let mut db_pool_max_size = parsed_or_default(
            env,
            mode,
            DB_POOL_MAX_SIZE_ENV,
            DEFAULT_MAX_SIZE,
            "a positive integer",
        )?;
        if db_pool_max_size == 0 {
            db_pool_max_size = invalid_or_default(
                mode,
                DB_POOL_MAX_SIZE_ENV,
                "0".to_owned(),
                DEFAULT_MAX_SIZE,
                "a positive integer",
            )?;
        }

        Ok(Self {
            jwt_secret,
            bind_addr: SocketAddr::new(host, port),
            database_url: database_url_from_env(env),
            db_pool_max_size,
        })
    }
}

fn jwt_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<String>, AppConfigError> {
    let Some(secret) = env
        .string(JWT_SECRET_ENV)
        .filter(|value| !value.is_empty())
        .map(Zeroizing::new)
    else {
        if mode.is_debug() {
            warn!("using temporary signing secret (dev only); tokens die with the process");
            return Ok(ephemeral_secret());
        }
        return Err(AppConfigError::MissingEnv {
            name: JWT_SECRET_ENV,
        });
    };

    let length = secret.len();
    if length < JWT_SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(length, min_len = JWT_SECRET_MIN_LEN, "JWT_SECRET shorter than recommended");
        } else {
            return Err(AppConfigError::SecretTooShort {
                name: JWT_SECRET_ENV,
                length,
                min_len: JWT_SECRET_MIN_LEN,
            });
        }
    }
    Ok(secret)
}

/// Random alphanumeric secret drawn from the OS generator.
fn ephemeral_secret() -> Zeroizing<String> {
    Zeroizing::new(
        OsRng
            .sample_iter(Alphanumeric)
            .take(EPHEMERAL_JWT_SECRET_LEN)
            .map(char::from)
            .collect(),
    )
}

fn database_url_from_env<E: Env>(env: &E) -> Option<String> {
    let url = env
        .string(DATABASE_URL_ENV)
        .filter(|url| !url.trim().is_empty());
    if url.is_none() {
        warn!("DATABASE_URL not set; records are kept in memory and lost on restart");
    }
    url
}

fn parsed_or_default<E: Env, T: FromStr>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, AppConfigError> {
    match env.string(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => invalid_or_default(mode, name, value, default, expected),
        },
    }
}

fn invalid_or_default<T>(
    mode: BuildMode,
    name: &'static str,
    value: String,
    default: T,
    expected: &'static str,
) -> Result<T, AppConfigError> {
    if mode.is_debug() {
        warn!(variable = name, value = %value, "invalid value; using default");
        Ok(default)
    } else {
        Err(AppConfigError::InvalidEnv {
            name,
            value,
            expected,
        })
    }
}
