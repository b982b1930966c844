//! Account API handlers.
//!
//! ```text
//! POST /auth/register {"username":"alice","password":"pw123","role":"user"}
//! POST /auth/login {"username":"alice","password":"pw123"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::account_service::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::{AuthSession, Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::registration_validation_error;

/// Registration body for `POST /auth/register`.
///
/// Fields are optional so that absent values get the same validation
/// message as blank ones.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "pw123")]
    pub password: Option<String>,
    /// `user` or `provider`.
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// Login body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "pw123")]
    pub password: Option<String>,
}

/// Create an account and return it with a bearer token.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthSession),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already exists", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<AuthSession>> {
    let RegisterRequest {
        username,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(
        username.as_deref(),
        password.as_deref(),
        role.as_deref(),
    )
    .map_err(registration_validation_error)?;
    let session = state.accounts.register(&registration).await?;
    Ok(web::Json(session))
}

/// Exchange credentials for a bearer token.
///
/// Missing fields, unknown usernames and wrong passwords are
/// indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthSession),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthSession>> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(username.as_deref(), password.as_deref())
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;
    let session = state.accounts.login(&credentials).await?;
    Ok(web::Json(session))
}
