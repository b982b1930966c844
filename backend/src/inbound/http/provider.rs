//! Provider queue handlers. Both routes require the provider role.
//!
//! ```text
//! GET /provider/requests
//! POST /provider/requests/{id}/resolve
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GuidanceRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::ProviderUser;
use crate::inbound::http::state::HttpState;

/// Acknowledgement returned by the resolve endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResolveResponse {
    pub ok: bool,
}

/// Pending guidance requests from every user, newest first.
#[utoipa::path(
    get,
    path = "/provider/requests",
    responses(
        (status = 200, description = "Pending requests", body = [GuidanceRequest]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Provider role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["provider"],
    operation_id = "listPendingRequests",
    security(("bearer" = []))
)]
#[get("/provider/requests")]
pub async fn pending_requests(
    _provider: ProviderUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<GuidanceRequest>>> {
    let requests = state.provider_queue.pending_requests().await?;
    Ok(web::Json(requests))
}

/// Mark a guidance request resolved.
///
/// Unknown and already-resolved ids still answer `{"ok": true}`.
#[utoipa::path(
    post,
    path = "/provider/requests/{id}/resolve",
    params(("id" = i64, Path, description = "Guidance request id")),
    responses(
        (status = 200, description = "Request resolved", body = ResolveResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Provider role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["provider"],
    operation_id = "resolveRequest",
    security(("bearer" = []))
)]
#[post("/provider/requests/{id}/resolve")]
pub async fn resolve_request(
    provider: ProviderUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ResolveResponse>> {
    let request_id = path.into_inner();
    tracing::info!(
        provider_id = %provider.identity().user_id(),
        request_id,
        "resolving guidance request"
    );
    state.provider_queue.resolve(request_id).await?;
    Ok(web::Json(ResolveResponse { ok: true }))
}
