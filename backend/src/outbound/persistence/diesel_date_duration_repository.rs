//! PostgreSQL-backed `DateDurationRepository` reading the `date_durations` view.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{DateDurationRepository, DateDurationRepositoryError};
use crate::domain::{DailyDurationSummary, Login};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::DateDurationRow;
use super::paging::{limit_offset, total_from_count};
use super::pool::DbPool;
use super::schema::date_durations;

/// Diesel-backed implementation of [`DateDurationRepository`].
#[derive(Clone)]
pub struct DieselDateDurationRepository {
    pool: DbPool,
}

impl DieselDateDurationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: &diesel::result::Error, operation: &'static str) -> DateDurationRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        DateDurationRepositoryError::query,
        DateDurationRepositoryError::connection,
    )
}

#[async_trait]
impl DateDurationRepository for DieselDateDurationRepository {
    async fn find_by_owner_login(
        &self,
        login: &Login,
        page: PageRequest,
    ) -> Result<Page<DailyDurationSummary>, DateDurationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DateDurationRepositoryError::connection))?;
        let (limit, offset) = limit_offset(page);

        let count: i64 = date_durations::table
            .filter(date_durations::login.eq(login.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "count date durations"))?;
        let rows: Vec<DateDurationRow> = date_durations::table
            .filter(date_durations::login.eq(login.as_ref()))
            .order_by(date_durations::local_date.asc())
            .limit(limit)
            .offset(offset)
            .select(DateDurationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "list date durations"))?;

        let items = rows
            .into_iter()
            .map(DailyDurationSummary::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DateDurationRepositoryError::query)?;
        Ok(Page::new(items, total_from_count(count), page))
    }
}
