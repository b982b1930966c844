//! Address API handlers.
//!
//! ```text
//! POST /addresses {"label":"Home","line1":"12 MG Road","city":"Bengaluru"}
//! GET /addresses
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Address, AddressDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::booking_validation_error;

/// Body for `POST /addresses`. Blank optional fields are stored as null.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddressRequest {
    pub label: Option<String>,
    #[schema(example = "12 MG Road")]
    pub line1: Option<String>,
    #[schema(example = "Bengaluru")]
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

/// Save an address for the caller.
#[utoipa::path(
    post,
    path = "/addresses",
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Stored address", body = Address),
        (status = 400, description = "line1 and city required", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "createAddress",
    security(("bearer" = []))
)]
#[post("/addresses")]
pub async fn create_address(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<AddressRequest>,
) -> ApiResult<web::Json<Address>> {
    let body = payload.into_inner();
    let draft = AddressDraft::try_from_parts(
        body.label.as_deref(),
        body.line1.as_deref(),
        body.city.as_deref(),
        body.state.as_deref(),
        body.pincode.as_deref(),
    )
    .map_err(booking_validation_error)?;
    let address = state
        .bookings
        .add_address(user.identity().user_id(), &draft)
        .await?;
    Ok(web::Json(address))
}

/// List the caller's addresses in the order they were saved.
#[utoipa::path(
    get,
    path = "/addresses",
    responses(
        (status = 200, description = "Saved addresses, oldest first", body = [Address]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "listAddresses",
    security(("bearer" = []))
)]
#[get("/addresses")]
pub async fn list_addresses(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Address>>> {
    let addresses = state
        .bookings_query
        .addresses(user.identity().user_id())
        .await?;
    Ok(web::Json(addresses))
}
