//! Guidance request handlers.
//!
//! ```text
//! POST /guidance {"note":"Post-surgery dressing questions"}
//! GET /guidance/my
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GuidanceDraft, GuidanceRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::optional_json_body;

/// Body for `POST /guidance`. The whole body may be omitted.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GuidanceRequestBody {
    #[schema(example = "Post-surgery dressing questions")]
    pub note: Option<String>,
}

/// Ask a provider for guidance. Requests start out pending.
#[utoipa::path(
    post,
    path = "/guidance",
    request_body(content = GuidanceRequestBody, description = "Optional note"),
    responses(
        (status = 200, description = "Stored request", body = GuidanceRequest),
        (status = 400, description = "Malformed body", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["guidance"],
    operation_id = "requestGuidance",
    security(("bearer" = []))
)]
#[post("/guidance")]
pub async fn request_guidance(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Bytes,
) -> ApiResult<web::Json<GuidanceRequest>> {
    let body: GuidanceRequestBody = optional_json_body(&payload)?;
    let draft = GuidanceDraft::new(body.note.as_deref());
    let request = state
        .bookings
        .request_guidance(user.identity().user_id(), &draft)
        .await?;
    Ok(web::Json(request))
}

/// List the caller's guidance requests, newest first.
#[utoipa::path(
    get,
    path = "/guidance/my",
    responses(
        (status = 200, description = "Guidance requests", body = [GuidanceRequest]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["guidance"],
    operation_id = "listGuidanceRequests",
    security(("bearer" = []))
)]
#[get("/guidance/my")]
pub async fn my_guidance_requests(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<GuidanceRequest>>> {
    let requests = state
        .bookings_query
        .guidance_requests(user.identity().user_id())
        .await?;
    Ok(web::Json(requests))
}
