//! Wiring of domain services onto either PostgreSQL or fixture adapters.

use std::sync::Arc;

use napchart::domain::ports::{
    DateDurationRepository, DurationRatingRepository, FixtureDateDurationRepository,
    FixtureDurationRatingRepository, FixtureLoginService, FixtureNapRepository,
    FixtureUserDirectory, NapRepository, UserDirectory,
};
use napchart::domain::{DurationAccessService, DurationRatingService, NapAccessService};
use napchart::inbound::http::state::HttpState;
use napchart::outbound::persistence::{
    DbPool, DieselDateDurationRepository, DieselDurationRatingRepository, DieselNapRepository,
    DieselUserDirectory,
};
use tracing::warn;

/// Handler state over the given driven adapters.
///
/// Login always goes through the fixture credential set; the identity
/// provider is external to this service.
fn assemble<N, U, S, R>(naps: N, users: U, summaries: S, ratings: R) -> HttpState
where
    N: NapRepository + 'static,
    U: UserDirectory + 'static,
    S: DateDurationRepository + 'static,
    R: DurationRatingRepository + 'static,
{
    HttpState::with_nap_service(
        Arc::new(FixtureLoginService),
        Arc::new(NapAccessService::new(Arc::new(naps), Arc::new(users))),
        Arc::new(DurationAccessService::new(Arc::new(summaries))),
        Arc::new(DurationRatingService::new(Arc::new(ratings))),
    )
}

/// Build handler state, backed by PostgreSQL when a pool is configured.
pub(crate) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    match pool {
        Some(pool) => assemble(
            DieselNapRepository::new(pool.clone()),
            DieselUserDirectory::new(pool.clone()),
            DieselDateDurationRepository::new(pool.clone()),
            DieselDurationRatingRepository::new(pool.clone()),
        ),
        None => {
            warn!("no database configured; serving fixture data");
            fixture_http_state()
        }
    }
}

pub(crate) fn fixture_http_state() -> HttpState {
    assemble(
        FixtureNapRepository,
        FixtureUserDirectory,
        FixtureDateDurationRepository,
        FixtureDurationRatingRepository,
    )
}
