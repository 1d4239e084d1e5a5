//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are what inbound
//! adapters call. Driven ports (`*Repository`, [`UserDirectory`]) are what
//! services call; each exposes a typed error so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod date_duration_query;
mod date_duration_repository;
mod duration_rating_query;
mod duration_rating_repository;
mod login_service;
mod nap_command;
mod nap_query;
mod nap_repository;
mod user_directory;

#[cfg(test)]
pub use date_duration_query::MockDateDurationQuery;
pub use date_duration_query::{DateDurationQuery, ListDateDurationsRequest};
#[cfg(test)]
pub use date_duration_repository::MockDateDurationRepository;
pub use date_duration_repository::{
    DateDurationRepository, DateDurationRepositoryError, FixtureDateDurationRepository,
};
#[cfg(test)]
pub use duration_rating_query::MockDurationRatingQuery;
pub use duration_rating_query::{DurationRatingQuery, ListDurationRatingsRequest};
#[cfg(test)]
pub use duration_rating_repository::MockDurationRatingRepository;
pub use duration_rating_repository::{
    DurationRatingRepository, DurationRatingRepositoryError, FixtureDurationRatingRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use nap_command::MockNapCommand;
pub use nap_command::{
    CreateNapRequest, DeleteNapRequest, NapCommand, UpdateNapRequest, UpsertOutcome,
};
#[cfg(test)]
pub use nap_query::MockNapQuery;
pub use nap_query::{GetNapRequest, ListNapsRequest, NapQuery};
#[cfg(test)]
pub use nap_repository::MockNapRepository;
pub use nap_repository::{FixtureNapRepository, NapRepository, NapRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
