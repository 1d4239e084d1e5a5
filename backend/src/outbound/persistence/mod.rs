//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map
//! database failures onto their port's error enum. Row structs and table
//! definitions stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use napchart::outbound::persistence::{DbPool, DieselNapRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/napchart")).await?;
//! let naps = DieselNapRepository::new(pool);
//! ```

mod diesel_date_duration_repository;
mod diesel_duration_rating_repository;
mod diesel_error_mapping;
mod diesel_nap_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod paging;
mod pool;
mod schema;

pub use diesel_date_duration_repository::DieselDateDurationRepository;
pub use diesel_duration_rating_repository::DieselDurationRatingRepository;
pub use diesel_nap_repository::DieselNapRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
