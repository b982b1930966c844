//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the credential and booking repository ports,
//! backed by PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types; validation and pricing happen before they are called.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to the port
//!   error enums; unique and foreign key violations get dedicated variants.
//!
//! # Example
//!
//! ```no_run
//! use carebook::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/carebook")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_booking_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
