//! PostgreSQL-backed `UserDirectory` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Login, User};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`UserDirectory`].
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserDirectoryError::connection))?;
        let row: Option<UserRow> = users::table
            .filter(users::login.eq(login.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_basic_diesel_error(
                    &err,
                    "find user by login",
                    UserDirectoryError::query,
                    UserDirectoryError::connection,
                )
            })?;
        row.map(User::try_from)
            .transpose()
            .map_err(UserDirectoryError::query)
    }
}
