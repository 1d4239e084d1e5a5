//! Domain primitives, ownership rules, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, the pure access-control rules in [`access`], and the services
//! implementing the driving ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Login / User / Principal / Role: identity.
//! - Nap / NapDraft / ResolvedNap: nap records through their lifecycle.
//! - DailyDurationSummary / DurationRating: read-only aggregates.
//! - NapAccessService / DurationAccessService / DurationRatingService.

pub mod access;
pub mod auth;
pub mod date_duration;
pub mod duration_access_service;
pub mod duration_rating;
pub mod error;
pub mod nap;
pub mod nap_access_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, Principal, Role, RoleParseError, RoleSet,
};
pub use self::date_duration::{DailyDurationError, DailyDurationSummary};
pub use self::duration_access_service::{DurationAccessService, DurationRatingService};
pub use self::duration_rating::DurationRating;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::nap::{Nap, NapDetails, NapDraft, NapId, NapIdError, ResolvedNap};
pub use self::nap_access_service::NapAccessService;
pub use self::trace_id::TraceId;
pub use self::user::{LOGIN_MAX, Login, LoginError, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use napchart::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
