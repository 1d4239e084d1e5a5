//! User identity: the login every nap is owned by.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned when building a [`Login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Login was missing or blank once trimmed.
    Empty,
    /// Login exceeded [`LOGIN_MAX`] characters.
    TooLong { max: usize },
    /// Login contained characters outside the accepted set.
    InvalidCharacters,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "login must not be empty"),
            Self::TooLong { max } => write!(f, "login must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "login may only contain letters, digits, and the characters _ . @ -",
            ),
        }
    }
}

impl std::error::Error for LoginError {}

/// Maximum allowed length for a login.
pub const LOGIN_MAX: usize = 50;

static LOGIN_RE: OnceLock<Regex> = OnceLock::new();

fn login_regex() -> &'static Regex {
    LOGIN_RE.get_or_init(|| {
        Regex::new("^[_.@A-Za-z0-9-]+$")
            .unwrap_or_else(|error| panic!("login regex failed to compile: {error}"))
    })
}

/// Normalised account login.
///
/// ## Invariants
/// - Trimmed and lower-cased.
/// - Between 1 and [`LOGIN_MAX`] characters from `[_.@A-Za-z0-9-]`.
///
/// Two logins compare equal exactly when their normalised text matches, so
/// ownership checks are case-insensitive.
///
/// # Examples
/// ```
/// use napchart::domain::Login;
///
/// let login = Login::new("  Alice ").expect("valid login");
/// assert_eq!(login.as_ref(), "alice");
/// assert!(Login::new("bob smith").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Validate and normalise a login.
    pub fn new(login: impl AsRef<str>) -> Result<Self, LoginError> {
        let normalised = login.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginError::Empty);
        }
        if normalised.chars().count() > LOGIN_MAX {
            return Err(LoginError::TooLong { max: LOGIN_MAX });
        }
        if !login_regex().is_match(&normalised) {
            return Err(LoginError::InvalidCharacters);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Login> for String {
    fn from(value: Login) -> Self {
        value.0
    }
}

impl TryFrom<String> for Login {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user record as held by the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i64,
    login: Login,
}

impl User {
    /// Build a user record.
    pub fn new(id: i64, login: Login) -> Self {
        Self { id, login }
    }

    /// Directory identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Login that owns this user's naps.
    pub fn login(&self) -> &Login {
        &self.login
    }
}
