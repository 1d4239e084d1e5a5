//! PostgreSQL-backed `NapRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{NapRepository, NapRepositoryError};
use crate::domain::{Login, Nap, NapId, ResolvedNap};

use super::diesel_error_mapping::{DieselFailure, classify, map_pool_error};
use super::models::{NapRow, NapUpdate, NewNapRow};
use super::paging::{limit_offset, total_from_count};
use super::pool::{DbPool, PoolError};
use super::schema::naps;

/// Diesel-backed implementation of [`NapRepository`].
#[derive(Clone)]
pub struct DieselNapRepository {
    pool: DbPool,
}

impl DieselNapRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NapRepositoryError {
    map_pool_error(error, NapRepositoryError::connection)
}

/// Map Diesel failures; a foreign key violation on a write means the owner
/// login has no user row.
fn diesel_error(
    error: &DieselError,
    operation: &'static str,
    owner: Option<&Login>,
) -> NapRepositoryError {
    match (classify(error, operation), owner) {
        (DieselFailure::Connection, _) => {
            NapRepositoryError::connection(format!("{operation}: database connection error"))
        }
        (DieselFailure::ForeignKey, Some(owner)) => NapRepositoryError::unknown_owner(owner.as_ref()),
        (DieselFailure::CheckViolation, _) => {
            NapRepositoryError::rejected(format!("{operation}: check constraint violated"))
        }
        _ => NapRepositoryError::query(format!("{operation}: database error")),
    }
}

fn to_domain(row: NapRow) -> Result<Nap, NapRepositoryError> {
    Nap::try_from(row).map_err(NapRepositoryError::query)
}

fn to_page(rows: Vec<NapRow>, count: i64, page: PageRequest) -> Result<Page<Nap>, NapRepositoryError> {
    let items = rows
        .into_iter()
        .map(to_domain)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(items, total_from_count(count), page))
}

#[async_trait]
impl NapRepository for DieselNapRepository {
    async fn save(&self, nap: &ResolvedNap) -> Result<Nap, NapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let owner = Some(nap.owner());

        let row = match nap.id() {
            None => diesel::insert_into(naps::table)
                .values(NewNapRow::from(nap))
                .returning(NapRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|err| diesel_error(&err, "insert nap", owner))?,
            Some(id) => diesel::update(naps::table.find(id.get()))
                .set(NapUpdate::new(nap, Utc::now()))
                .returning(NapRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| diesel_error(&err, "update nap", owner))?
                .ok_or_else(|| NapRepositoryError::missing(id.get()))?,
        };
        debug!(nap_id = row.id, "nap row written");
        to_domain(row)
    }

    async fn find_by_id(&self, id: NapId) -> Result<Option<Nap>, NapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        naps::table
            .find(id.get())
            .select(NapRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err, "find nap", None))?
            .map(to_domain)
            .transpose()
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Nap>, NapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (limit, offset) = limit_offset(page);

        let count: i64 = naps::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "count naps", None))?;
        let rows: Vec<NapRow> = naps::table
            .order_by(naps::id.asc())
            .limit(limit)
            .offset(offset)
            .select(NapRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "list naps", None))?;
        to_page(rows, count, page)
    }

    async fn find_by_owner(
        &self,
        owner: &Login,
        page: PageRequest,
    ) -> Result<Page<Nap>, NapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (limit, offset) = limit_offset(page);

        let count: i64 = naps::table
            .filter(naps::owner_login.eq(owner.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "count owned naps", None))?;
        let rows: Vec<NapRow> = naps::table
            .filter(naps::owner_login.eq(owner.as_ref()))
            .order_by(naps::id.asc())
            .limit(limit)
            .offset(offset)
            .select(NapRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "list owned naps", None))?;
        to_page(rows, count, page)
    }

    async fn delete_by_id(&self, id: NapId) -> Result<(), NapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(naps::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(&err, "delete nap", None))?;
        debug!(nap_id = id.get(), removed, "nap delete executed");
        Ok(())
    }
}
