//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]`, the
//! record and error schemas they exchange, and the bearer token scheme that
//! protects the booking routes. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Address, AmbulanceBooking, AuthSession, Error, ErrorCode, GuidanceRequest, GuidanceStatus,
    NurseBooking, Role, Subscription, SubscriptionType, User,
};
use crate::inbound::http::accounts::{LoginRequest, RegisterRequest};
use crate::inbound::http::addresses::AddressRequest;
use crate::inbound::http::ambulance::AmbulanceBookingRequest;
use crate::inbound::http::guidance::GuidanceRequestBody;
use crate::inbound::http::health::{ProbeResponse, ProbeStatus};
use crate::inbound::http::nurse::NurseBookingRequest;
use crate::inbound::http::provider::ResolveResponse;
use crate::inbound::http::subscriptions::SubscriptionRequest;

/// Name of the bearer scheme referenced by protected handlers.
pub const BEARER_SCHEME: &str = "bearer";

/// Register the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /auth/register or POST /auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Carebook API",
        description = "Home-care bookings: nurses, subscriptions, ambulances and provider guidance."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::addresses::create_address,
        crate::inbound::http::addresses::list_addresses,
        crate::inbound::http::nurse::book_nurse,
        crate::inbound::http::nurse::my_nurse_bookings,
        crate::inbound::http::subscriptions::subscribe,
        crate::inbound::http::subscriptions::my_subscriptions,
        crate::inbound::http::guidance::request_guidance,
        crate::inbound::http::guidance::my_guidance_requests,
        crate::inbound::http::ambulance::book_ambulance,
        crate::inbound::http::ambulance::my_ambulance_bookings,
        crate::inbound::http::provider::pending_requests,
        crate::inbound::http::provider::resolve_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        AuthSession,
        RegisterRequest,
        LoginRequest,
        Address,
        AddressRequest,
        NurseBooking,
        NurseBookingRequest,
        Subscription,
        SubscriptionType,
        SubscriptionRequest,
        GuidanceRequest,
        GuidanceStatus,
        GuidanceRequestBody,
        AmbulanceBooking,
        AmbulanceBookingRequest,
        ResolveResponse,
        ProbeResponse,
        ProbeStatus,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "addresses", description = "Saved addresses"),
        (name = "nurse", description = "Nurse hire"),
        (name = "subscriptions", description = "Day and night care plans"),
        (name = "guidance", description = "Guidance requests"),
        (name = "ambulance", description = "Ambulance dispatch"),
        (name = "provider", description = "Provider guidance queue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
