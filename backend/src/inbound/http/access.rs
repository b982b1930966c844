//! Bearer-token extractors.
//!
//! Declare [`AuthenticatedUser`] or [`ProviderUser`] as the first handler
//! argument: it resolves before the body extractor, so a missing or bad
//! token yields `401` even when the body is invalid.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};

use crate::domain::access::{authenticate, require_role};
use crate::domain::{Error, Identity, Role};
use crate::inbound::http::state::HttpState;

fn identity_from_request(req: &HttpRequest) -> Result<Identity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    authenticate(state.tokens.as_ref(), authorization)
}

/// Caller proven by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).map(Self))
    }
}

/// Caller proven by a valid bearer token carrying the provider role.
#[derive(Debug, Clone)]
pub struct ProviderUser(pub Identity);

impl ProviderUser {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for ProviderUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity =
            identity_from_request(req).and_then(|identity| require_role(identity, Role::Provider));
        ready(identity.map(Self))
    }
}
