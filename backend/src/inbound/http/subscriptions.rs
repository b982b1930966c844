//! Subscription plan handlers.
//!
//! ```text
//! POST /subscriptions {"type":"night","days":5}
//! GET /subscriptions/my
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Subscription, SubscriptionDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::booking_validation_error;

/// Body for `POST /subscriptions`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubscriptionRequest {
    /// `day` or `night`.
    #[serde(rename = "type")]
    #[schema(example = "night")]
    pub kind: Option<String>,
    #[schema(example = 5)]
    pub days: Option<f64>,
}

/// Start a day or night care plan.
#[utoipa::path(
    post,
    path = "/subscriptions",
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Stored subscription", body = Subscription),
        (status = 400, description = "type(day/night) and positive days required", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "subscribe",
    security(("bearer" = []))
)]
#[post("/subscriptions")]
pub async fn subscribe(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<SubscriptionRequest>,
) -> ApiResult<web::Json<Subscription>> {
    let body = payload.into_inner();
    let draft = SubscriptionDraft::try_from_parts(body.kind.as_deref(), body.days)
        .map_err(booking_validation_error)?;
    let subscription = state
        .bookings
        .subscribe(user.identity().user_id(), &draft)
        .await?;
    Ok(web::Json(subscription))
}

/// List the caller's subscriptions, newest first.
#[utoipa::path(
    get,
    path = "/subscriptions/my",
    responses(
        (status = 200, description = "Subscriptions", body = [Subscription]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions",
    security(("bearer" = []))
)]
#[get("/subscriptions/my")]
pub async fn my_subscriptions(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Subscription>>> {
    let subscriptions = state
        .bookings_query
        .subscriptions(user.identity().user_id())
        .await?;
    Ok(web::Json(subscriptions))
}
