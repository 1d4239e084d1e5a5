//! Port for looking up user records by login.
use async_trait::async_trait;

use crate::domain::{Login, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "user directory query failed: {message}",
    }
}

/// Read access to the user records that own naps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the user record for `login`.
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserDirectoryError>;
}

/// Directory holding the two seeded accounts, `admin` (id 1) and `user` (id 2).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserDirectoryError> {
        let id = match login.as_ref() {
            "admin" => 1,
            "user" => 2,
            _ => return Ok(None),
        };
        Ok(Some(User::new(id, login.clone())))
    }
}
