//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only depend on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DateDurationQuery, DurationRatingQuery, LoginService, NapCommand, NapQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub naps: Arc<dyn NapCommand>,
    pub naps_query: Arc<dyn NapQuery>,
    pub date_durations: Arc<dyn DateDurationQuery>,
    pub duration_ratings: Arc<dyn DurationRatingQuery>,
}

impl HttpState {
    /// Wire every port from one service that implements both nap ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use napchart::domain::ports::{
    ///     FixtureDateDurationRepository, FixtureDurationRatingRepository, FixtureLoginService,
    ///     FixtureNapRepository, FixtureUserDirectory,
    /// };
    /// use napchart::domain::{DurationAccessService, DurationRatingService, NapAccessService};
    /// use napchart::inbound::http::state::HttpState;
    ///
    /// let naps = Arc::new(NapAccessService::new(
    ///     Arc::new(FixtureNapRepository),
    ///     Arc::new(FixtureUserDirectory),
    /// ));
    /// let state = HttpState::with_nap_service(
    ///     Arc::new(FixtureLoginService),
    ///     naps,
    ///     Arc::new(DurationAccessService::new(Arc::new(FixtureDateDurationRepository))),
    ///     Arc::new(DurationRatingService::new(Arc::new(FixtureDurationRatingRepository))),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn with_nap_service<S>(
        login: Arc<dyn LoginService>,
        naps: Arc<S>,
        date_durations: Arc<dyn DateDurationQuery>,
        duration_ratings: Arc<dyn DurationRatingQuery>,
    ) -> Self
    where
        S: NapCommand + NapQuery + 'static,
    {
        Self {
            login,
            naps: naps.clone(),
            naps_query: naps,
            date_durations,
            duration_ratings,
        }
    }
}
