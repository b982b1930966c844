//! Nurse hire handlers.
//!
//! ```text
//! POST /nurse/book {"area":"Koramangala","hours":3}
//! GET /nurse/my
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NurseBooking, NurseBookingDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::booking_validation_error;

/// Body for `POST /nurse/book`. Any client-supplied total is ignored.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NurseBookingRequest {
    #[schema(example = "Koramangala")]
    pub area: Option<String>,
    /// Whole hours, at least one.
    #[schema(example = 3)]
    pub hours: Option<i64>,
}

/// Book a nurse at the fixed hourly rate.
#[utoipa::path(
    post,
    path = "/nurse/book",
    request_body = NurseBookingRequest,
    responses(
        (status = 200, description = "Stored booking", body = NurseBooking),
        (status = 400, description = "area and positive hours required", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nurse"],
    operation_id = "bookNurse",
    security(("bearer" = []))
)]
#[post("/nurse/book")]
pub async fn book_nurse(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<NurseBookingRequest>,
) -> ApiResult<web::Json<NurseBooking>> {
    let body = payload.into_inner();
    let draft = NurseBookingDraft::try_from_parts(body.area.as_deref(), body.hours)
        .map_err(booking_validation_error)?;
    let booking = state
        .bookings
        .book_nurse(user.identity().user_id(), &draft)
        .await?;
    Ok(web::Json(booking))
}

/// List the caller's nurse bookings, newest first.
#[utoipa::path(
    get,
    path = "/nurse/my",
    responses(
        (status = 200, description = "Nurse bookings", body = [NurseBooking]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nurse"],
    operation_id = "listNurseBookings",
    security(("bearer" = []))
)]
#[get("/nurse/my")]
pub async fn my_nurse_bookings(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<NurseBooking>>> {
    let bookings = state
        .bookings_query
        .nurse_bookings(user.identity().user_id())
        .await?;
    Ok(web::Json(bookings))
}
