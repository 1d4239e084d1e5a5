//! Driving port for the duration rating chart data.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DurationRating, Error, Principal};

#[derive(Debug, Clone, PartialEq)]
pub struct ListDurationRatingsRequest {
    pub principal: Option<Principal>,
    pub page: PageRequest,
}

/// Driving port for duration rating reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DurationRatingQuery: Send + Sync {
    /// Page over average ratings; any authenticated caller may read them.
    async fn list(&self, request: ListDurationRatingsRequest) -> Result<Page<DurationRating>, Error>;
}
