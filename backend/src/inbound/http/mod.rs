//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers translate JSON bodies into validated drafts, call the driving
//! ports held in [`state::HttpState`] and render [`crate::domain::Error`]
//! through [`error`].

pub mod access;
pub mod accounts;
pub mod addresses;
pub mod ambulance;
pub mod error;
pub mod guidance;
pub mod health;
pub mod nurse;
pub mod provider;
pub mod state;
pub mod subscriptions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every API route together with the extractor error handlers.
///
/// Health probes and API docs are mounted separately by the server.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use carebook::inbound::http::api_routes;
///
/// let app = App::new().configure(api_routes);
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(addresses::create_address)
        .service(addresses::list_addresses)
        .service(nurse::book_nurse)
        .service(nurse::my_nurse_bookings)
        .service(subscriptions::subscribe)
        .service(subscriptions::my_subscriptions)
        .service(guidance::request_guidance)
        .service(guidance::my_guidance_requests)
        .service(ambulance::book_ambulance)
        .service(ambulance::my_ambulance_bookings)
        .service(provider::pending_requests)
        .service(provider::resolve_request);
}

#[cfg(test)]
mod api_tests;
