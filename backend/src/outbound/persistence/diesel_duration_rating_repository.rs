//! PostgreSQL-backed `DurationRatingRepository` reading the `duration_ratings` view.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::DurationRating;
use crate::domain::ports::{DurationRatingRepository, DurationRatingRepositoryError};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::DurationRatingRow;
use super::paging::{limit_offset, total_from_count};
use super::pool::DbPool;
use super::schema::duration_ratings;

/// Diesel-backed implementation of [`DurationRatingRepository`].
#[derive(Clone)]
pub struct DieselDurationRatingRepository {
    pool: DbPool,
}

impl DieselDurationRatingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(
    error: &diesel::result::Error,
    operation: &'static str,
) -> DurationRatingRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        DurationRatingRepositoryError::query,
        DurationRatingRepositoryError::connection,
    )
}

#[async_trait]
impl DurationRatingRepository for DieselDurationRatingRepository {
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<DurationRating>, DurationRatingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DurationRatingRepositoryError::connection))?;
        let (limit, offset) = limit_offset(page);

        let count: i64 = duration_ratings::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "count duration ratings"))?;
        let rows: Vec<DurationRatingRow> = duration_ratings::table
            .order_by(duration_ratings::duration.asc())
            .limit(limit)
            .offset(offset)
            .select(DurationRatingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "list duration ratings"))?;

        let items = rows.into_iter().map(DurationRating::from).collect();
        Ok(Page::new(items, total_from_count(count), page))
    }
}
