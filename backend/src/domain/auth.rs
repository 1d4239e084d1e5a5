//! Authentication primitives: credentials, roles, and the acting principal.
//!
//! Inbound adapters validate raw strings through these constructors before
//! a handler talks to a port or service.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use super::Login;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use napchart::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" user ", "user").unwrap();
/// assert_eq!(creds.username(), "user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username as typed, trimmed.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Closed set of authorities a principal may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Full access to every user's records.
    Admin,
    /// Access to the principal's own records.
    User,
}

impl Role {
    /// Wire name of the role, as stored in sessions and returned by the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN" => Ok(Self::Admin),
            "ROLE_USER" => Ok(Self::User),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// Ordered, duplicate-free set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Whether `role` is held.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Add a role; returns `false` if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Roles in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Whether no roles are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The authenticated caller of an operation.
///
/// # Examples
/// ```
/// use napchart::domain::{Login, Principal, Role};
///
/// let admin = Principal::new(Login::new("admin").unwrap(), [Role::Admin, Role::User]);
/// assert!(admin.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    login: Login,
    roles: RoleSet,
}

impl Principal {
    /// Build a principal from a login and its roles.
    pub fn new(login: Login, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            login,
            roles: roles.into_iter().collect(),
        }
    }

    /// Login of the caller.
    pub fn login(&self) -> &Login {
        &self.login
    }

    /// Roles granted to the caller.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Whether the caller holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// Whether the caller holds [`Role::Admin`].
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}
