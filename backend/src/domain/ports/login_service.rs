//! Driving port for exchanging credentials for a principal.
//!
//! Identity is owned by an external provider. Handlers only see this trait,
//! so tests swap in a double instead of wiring a provider.

use async_trait::async_trait;

use crate::domain::{Error, Login, LoginCredentials, Principal, Role};

/// Authenticates credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the principal they identify.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Fixed credential set standing in for the identity provider.
///
/// - `admin` / `admin` authenticates with ADMIN and USER.
/// - `user` / `user` authenticates with USER.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    fn roles_for(username: &str, password: &str) -> Option<&'static [Role]> {
        match (username, password) {
            ("admin", "admin") => Some(&[Role::Admin, Role::User]),
            ("user", "user") => Some(&[Role::User]),
            _ => None,
        }
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let roles = Self::roles_for(credentials.username(), credentials.password())
            .ok_or_else(|| Error::unauthenticated("invalid credentials"))?;
        let login = Login::new(credentials.username())
            .map_err(|err| Error::internal(format!("invalid fixture login: {err}")))?;
        Ok(Principal::new(login, roles.iter().copied()))
    }
}
