//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AccountService`, `CareBookingCommand`,
//! `CareBookingQuery`, `ProviderQueue`) are called by inbound adapters.
//! Driven ports (`UserRepository`, `BookingRepository`, `TokenService`,
//! `PasswordHasher`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod booking_repository;
mod care_booking_command;
mod care_booking_query;
mod password_hasher;
mod provider_queue;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingPersistenceError, BookingRepository};
#[cfg(test)]
pub use care_booking_command::MockCareBookingCommand;
pub use care_booking_command::CareBookingCommand;
#[cfg(test)]
pub use care_booking_query::MockCareBookingQuery;
pub use care_booking_query::CareBookingQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use provider_queue::MockProviderQueue;
pub use provider_queue::ProviderQueue;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
