//! Rendering of domain errors as HTTP responses.
//!
//! Status codes follow [`ErrorCode`]; internal failures are logged in full
//! and then redacted so clients never see storage or crypto details.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

pub use crate::domain::ApiResult;

/// Message clients receive for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client: trace id filled from the request scope when
/// the error was built elsewhere, internal messages and details dropped.
fn client_payload(error: &Error) -> Error {
    let trace_id = error
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()));

    let payload = if matches!(error.code(), ErrorCode::InternalError) {
        error!(message = error.message(), details = ?error.details(), "internal error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    } else {
        error.clone()
    };
    match trace_id {
        Some(id) => payload.with_trace_id(id),
        None => payload,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let payload = client_payload(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = payload.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(payload)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}
