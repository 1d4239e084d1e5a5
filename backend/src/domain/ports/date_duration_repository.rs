//! Port for reading per-day duration summaries.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DailyDurationSummary, Login};

use super::define_port_error;

define_port_error! {
    /// Errors raised by duration summary adapters.
    pub enum DateDurationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "date duration repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "date duration repository query failed: {message}",
    }
}

/// Read-only store of daily summaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DateDurationRepository: Send + Sync {
    /// Page over the summaries whose login equals `login`, oldest day first.
    async fn find_by_owner_login(
        &self,
        login: &Login,
        page: PageRequest,
    ) -> Result<Page<DailyDurationSummary>, DateDurationRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDateDurationRepository;

#[async_trait]
impl DateDurationRepository for FixtureDateDurationRepository {
    async fn find_by_owner_login(
        &self,
        _login: &Login,
        page: PageRequest,
    ) -> Result<Page<DailyDurationSummary>, DateDurationRepositoryError> {
        Ok(Page::empty(page))
    }
}
