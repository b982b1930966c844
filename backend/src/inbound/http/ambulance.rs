//! Ambulance dispatch handlers.
//!
//! ```text
//! POST /ambulance/book {"distance_km":4.5,"pickup_address":"12 MG Road"}
//! GET /ambulance/my
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AmbulanceBooking, AmbulanceBookingDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::booking_validation_error;

/// Body for `POST /ambulance/book`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AmbulanceBookingRequest {
    #[schema(example = 4.5)]
    pub distance_km: Option<f64>,
    #[schema(example = "12 MG Road")]
    pub pickup_address: Option<String>,
}

/// Book an ambulance at the fixed per-kilometre rate.
#[utoipa::path(
    post,
    path = "/ambulance/book",
    request_body = AmbulanceBookingRequest,
    responses(
        (status = 200, description = "Stored booking", body = AmbulanceBooking),
        (status = 400, description = "positive distance_km and pickup_address required", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ambulance"],
    operation_id = "bookAmbulance",
    security(("bearer" = []))
)]
#[post("/ambulance/book")]
pub async fn book_ambulance(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<AmbulanceBookingRequest>,
) -> ApiResult<web::Json<AmbulanceBooking>> {
    let body = payload.into_inner();
    let draft =
        AmbulanceBookingDraft::try_from_parts(body.distance_km, body.pickup_address.as_deref())
            .map_err(booking_validation_error)?;
    let booking = state
        .bookings
        .book_ambulance(user.identity().user_id(), &draft)
        .await?;
    Ok(web::Json(booking))
}

/// List the caller's ambulance bookings, newest first.
#[utoipa::path(
    get,
    path = "/ambulance/my",
    responses(
        (status = 200, description = "Ambulance bookings", body = [AmbulanceBooking]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ambulance"],
    operation_id = "listAmbulanceBookings",
    security(("bearer" = []))
)]
#[get("/ambulance/my")]
pub async fn my_ambulance_bookings(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AmbulanceBooking>>> {
    let bookings = state
        .bookings_query
        .ambulance_bookings(user.identity().user_id())
        .await?;
    Ok(web::Json(bookings))
}
