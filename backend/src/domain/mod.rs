//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed care records, accounts and access
//! rules used by the HTTP and persistence layers. Types are immutable once
//! validated; drafts carry the invariants a stored row relies on.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User, Role, Identity: accounts and the identity a token proves.
//! - Address, NurseBooking, Subscription, AmbulanceBooking, GuidanceRequest
//!   and their drafts: the care records an account owns.
//! - AccountServiceImpl, CareBookingService, ProviderQueueService: services
//!   implementing the driving ports in [`ports`].

pub mod access;
pub mod account_service;
pub mod address;
pub mod ambulance_booking;
pub mod auth;
pub(crate) mod booking_validation;
pub mod care_booking_service;
pub mod error;
pub mod guidance_request;
pub mod nurse_booking;
pub mod ports;
pub mod pricing;
pub mod provider_queue_service;
pub mod subscription;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountServiceImpl;
pub use self::address::{Address, AddressDraft};
pub use self::ambulance_booking::{AmbulanceBooking, AmbulanceBookingDraft};
pub use self::auth::{
    AuthSession, CredentialsValidationError, Identity, LoginCredentials, Registration,
};
pub use self::booking_validation::BookingValidationError;
pub use self::care_booking_service::CareBookingService;
pub use self::error::{Error, ErrorCode};
pub use self::guidance_request::{
    GuidanceDraft, GuidanceRequest, GuidanceStatus, UnknownGuidanceStatus,
};
pub use self::nurse_booking::{NurseBooking, NurseBookingDraft};
pub use self::provider_queue_service::ProviderQueueService;
pub use self::subscription::{Subscription, SubscriptionDraft, SubscriptionType};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, Role, User, UserAccount, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use carebook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Forbidden"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
