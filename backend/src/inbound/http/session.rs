//! Session-backed identity.
//!
//! The cookie session is the identity collaborator for HTTP requests: login
//! stores the principal, every later request reads it back. Handlers only see
//! [`SessionContext`] and never touch the underlying Actix session.

use actix_session::{Session, SessionGetError};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Login, Principal, Role};

pub(crate) const LOGIN_KEY: &str = "login";
pub(crate) const ROLES_KEY: &str = "roles";

/// Newtype wrapper that exposes principal-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        let roles: Vec<&'static str> = principal.roles().iter().map(Role::as_str).collect();
        self.0.renew();
        self.0
            .insert(LOGIN_KEY, principal.login().as_ref())
            .and_then(|()| self.0.insert(ROLES_KEY, roles))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The principal stored in the session, if any.
    ///
    /// A login that no longer validates is treated as absent. Role names
    /// outside the known set are dropped.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let read_error =
            |error: SessionGetError| Error::internal(format!("failed to read session: {error}"));
        let Some(raw_login) = self.0.get::<String>(LOGIN_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        let login = match Login::new(&raw_login) {
            Ok(login) => login,
            Err(error) => {
                warn!("invalid login in session cookie: {error}");
                return Ok(None);
            }
        };
        let raw_roles = self
            .0
            .get::<Vec<String>>(ROLES_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        let roles: Vec<Role> = raw_roles
            .iter()
            .filter_map(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(error) => {
                    warn!(login = %login, "ignoring session role: {error}");
                    None
                }
            })
            .collect();
        Ok(Some(Principal::new(login, roles)))
    }

    /// Require a principal or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthenticated("login required"))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
