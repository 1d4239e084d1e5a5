//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers translate requests into port calls and domain errors into
//! responses; they never touch persistence directly.

pub mod alerts;
pub mod date_durations;
pub mod duration_ratings;
pub mod error;
pub mod health;
pub mod naps;
pub mod pagination;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
