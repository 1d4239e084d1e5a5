//! Port for the average-rating-per-duration aggregate.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::DurationRating;

use super::define_port_error;

define_port_error! {
    /// Errors raised by duration rating adapters.
    pub enum DurationRatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "duration rating repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "duration rating repository query failed: {message}",
    }
}

/// Read-only store of duration ratings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DurationRatingRepository: Send + Sync {
    /// Page over every rounded duration in ascending order.
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<DurationRating>, DurationRatingRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDurationRatingRepository;

#[async_trait]
impl DurationRatingRepository for FixtureDurationRatingRepository {
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<DurationRating>, DurationRatingRepositoryError> {
        Ok(Page::empty(page))
    }
}
