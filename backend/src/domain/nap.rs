//! Nap records and the drafts callers submit before ownership is settled.
//!
//! The three shapes track a nap through its lifecycle:
//! - [`NapDraft`]: caller input; owner and id may be absent or untrusted.
//! - [`ResolvedNap`]: owner settled by [`crate::domain::access::resolve_owner`].
//! - [`Nap`]: the stored record with its assigned identifier.

use std::fmt;

use chrono::{DateTime, Utc};

use super::Login;

/// Validation errors for nap identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NapIdError {
    /// Identifiers are strictly positive.
    NotPositive,
}

impl fmt::Display for NapIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "nap id must be a positive integer"),
        }
    }
}

impl std::error::Error for NapIdError {}

/// Store-assigned nap identifier.
///
/// # Examples
/// ```
/// use napchart::domain::NapId;
///
/// assert_eq!(NapId::new(7).map(|id| id.get()), Ok(7));
/// assert!(NapId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NapId(i64);

impl NapId {
    /// Validate a raw identifier.
    pub const fn new(raw: i64) -> Result<Self, NapIdError> {
        if raw <= 0 {
            return Err(NapIdError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Raw value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Payload attributes of a nap. Not interpreted by access control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NapDetails {
    /// When the nap started.
    pub start: Option<DateTime<Utc>>,
    /// When the nap ended.
    pub end: Option<DateTime<Utc>>,
    /// Length in hours.
    pub duration: Option<f64>,
    /// Caller's rating of the nap.
    pub rating: Option<i32>,
}

/// A nap as submitted by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NapDraft {
    /// Identifier for updates; absent for creation.
    pub id: Option<NapId>,
    /// Owner named by the caller. Only trusted for admins.
    pub owner: Option<Login>,
    /// Remaining attributes.
    pub details: NapDetails,
}

impl NapDraft {
    /// Draft for a brand new nap with no id and no owner.
    pub fn new(details: NapDetails) -> Self {
        Self {
            id: None,
            owner: None,
            details,
        }
    }

    /// Set the claimed owner.
    pub fn with_owner(mut self, owner: Login) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: NapId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A draft whose owner has been settled against the acting principal.
///
/// Only [`crate::domain::access::resolve_owner`] and stores rebuilding a
/// record produce values of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNap {
    id: Option<NapId>,
    owner: Login,
    details: NapDetails,
}

impl ResolvedNap {
    pub(crate) fn new(id: Option<NapId>, owner: Login, details: NapDetails) -> Self {
        Self { id, owner, details }
    }

    /// Identifier, present for updates.
    pub fn id(&self) -> Option<NapId> {
        self.id
    }

    /// Settled owner.
    pub fn owner(&self) -> &Login {
        &self.owner
    }

    /// Remaining attributes.
    pub fn details(&self) -> &NapDetails {
        &self.details
    }
}

/// A stored nap.
#[derive(Debug, Clone, PartialEq)]
pub struct Nap {
    id: NapId,
    owner: Login,
    details: NapDetails,
}

impl Nap {
    /// Rebuild a stored record.
    pub fn new(id: NapId, owner: Login, details: NapDetails) -> Self {
        Self { id, owner, details }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> NapId {
        self.id
    }

    /// Owning login.
    pub fn owner(&self) -> &Login {
        &self.owner
    }

    /// Remaining attributes.
    pub fn details(&self) -> &NapDetails {
        &self.details
    }

    /// Split into parts.
    pub fn into_parts(self) -> (NapId, Login, NapDetails) {
        (self.id, self.owner, self.details)
    }
}
