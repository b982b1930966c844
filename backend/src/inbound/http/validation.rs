//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, wrong JSON types, bad path segments)
//! and domain validation failures all leave as `400 invalid_request` with a
//! `details` object naming the offending field where one is known.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::domain::{BookingValidationError, CredentialsValidationError, Error};

/// Message returned when registration input is incomplete.
pub const REGISTRATION_REQUIRED_MESSAGE: &str = "username, password, role(user/provider) required";

/// Message returned for bodies that are not valid JSON for the endpoint.
pub const INVALID_JSON_MESSAGE: &str = "invalid JSON body";

/// Message returned for path segments that do not parse.
pub const INVALID_PATH_MESSAGE: &str = "invalid path parameter";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidPath,
    MissingField,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

fn invalid_with(message: impl Into<String>, field: Option<&str>, code: ErrorCode) -> Error {
    let details = match field {
        Some(field) => json!({ "field": field, "code": code.as_str() }),
        None => json!({ "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

/// Map a rejected care record draft to a `400` error.
pub(crate) fn booking_validation_error(err: BookingValidationError) -> Error {
    let code = match err {
        BookingValidationError::TotalOutOfRange => ErrorCode::OutOfRange,
        _ => ErrorCode::MissingField,
    };
    invalid_with(err.to_string(), Some(err.field()), code)
}

/// Map rejected registration input to a `400` error.
pub(crate) fn registration_validation_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyUsername => "username",
        CredentialsValidationError::EmptyPassword => "password",
        CredentialsValidationError::InvalidRole => "role",
    };
    invalid_with(REGISTRATION_REQUIRED_MESSAGE, Some(field), ErrorCode::MissingField)
}

fn invalid_json() -> Error {
    invalid_with(INVALID_JSON_MESSAGE, None, ErrorCode::InvalidJson)
}

/// Decode a body that may be omitted entirely.
///
/// An empty or whitespace-only body yields `T::default()`; anything else must
/// be valid JSON for `T`.
pub(crate) fn optional_json_body<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejected JSON body");
        invalid_json()
    })
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON body");
    invalid_json().into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    invalid_with(INVALID_PATH_MESSAGE, None, ErrorCode::InvalidPath).into()
}

/// JSON extractor configuration rendering failures as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration rendering failures as domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
