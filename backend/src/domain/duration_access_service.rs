//! Read-side services for duration aggregates.
//!
//! Daily summaries are always scoped to the caller's login, admins included.
//! Duration ratings span every user and only require a logged-in caller.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::access::require_principal;
use crate::domain::ports::{
    DateDurationQuery, DateDurationRepository, DateDurationRepositoryError, DurationRatingQuery,
    DurationRatingRepository, DurationRatingRepositoryError, ListDateDurationsRequest,
    ListDurationRatingsRequest,
};
use crate::domain::{DailyDurationSummary, DurationRating, Error};

fn map_date_duration_error(error: DateDurationRepositoryError) -> Error {
    match error {
        DateDurationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("date duration repository unavailable: {message}"))
        }
        DateDurationRepositoryError::Query { message } => {
            Error::internal(format!("date duration repository error: {message}"))
        }
    }
}

fn map_duration_rating_error(error: DurationRatingRepositoryError) -> Error {
    match error {
        DurationRatingRepositoryError::Connection { message } => Error::service_unavailable(
            format!("duration rating repository unavailable: {message}"),
        ),
        DurationRatingRepositoryError::Query { message } => {
            Error::internal(format!("duration rating repository error: {message}"))
        }
    }
}

/// Daily summary service implementing [`DateDurationQuery`].
#[derive(Clone)]
pub struct DurationAccessService<R> {
    summaries: Arc<R>,
}

impl<R> DurationAccessService<R> {
    pub fn new(summaries: Arc<R>) -> Self {
        Self { summaries }
    }
}

#[async_trait]
impl<R> DateDurationQuery for DurationAccessService<R>
where
    R: DateDurationRepository,
{
    async fn list_for_current_user(
        &self,
        request: ListDateDurationsRequest,
    ) -> Result<Page<DailyDurationSummary>, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        self.summaries
            .find_by_owner_login(principal.login(), request.page)
            .await
            .map_err(map_date_duration_error)
    }
}

/// Duration rating service implementing [`DurationRatingQuery`].
#[derive(Clone)]
pub struct DurationRatingService<R> {
    ratings: Arc<R>,
}

impl<R> DurationRatingService<R> {
    pub fn new(ratings: Arc<R>) -> Self {
        Self { ratings }
    }
}

#[async_trait]
impl<R> DurationRatingQuery for DurationRatingService<R>
where
    R: DurationRatingRepository,
{
    async fn list(
        &self,
        request: ListDurationRatingsRequest,
    ) -> Result<Page<DurationRating>, Error> {
        require_principal(request.principal.as_ref())?;
        self.ratings
            .find_all(request.page)
            .await
            .map_err(map_duration_rating_error)
    }
}
