//! Driving port for the caller's daily duration summaries.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DailyDurationSummary, Error, Principal};

/// Request for a page of the caller's summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDateDurationsRequest {
    pub principal: Option<Principal>,
    pub page: PageRequest,
}

/// Driving port for duration summary reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DateDurationQuery: Send + Sync {
    /// Page over the summaries owned by the caller. Admins get no wider view.
    async fn list_for_current_user(
        &self,
        request: ListDateDurationsRequest,
    ) -> Result<Page<DailyDurationSummary>, Error>;
}
