//! Driving port for nap mutations.
//!
//! Every request carries the principal the identity collaborator resolved
//! for the call, or `None` when nobody is logged in. The service decides
//! what an absent principal means for each operation.

use async_trait::async_trait;

use crate::domain::{Error, Nap, NapDraft, NapId, Principal};

/// Request to create a nap.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNapRequest {
    pub principal: Option<Principal>,
    pub nap: NapDraft,
}

/// Request to update a nap, or create it when the draft has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNapRequest {
    pub principal: Option<Principal>,
    pub nap: NapDraft,
}

/// Request to delete a nap.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteNapRequest {
    pub principal: Option<Principal>,
    pub id: NapId,
}

/// Which branch an update took.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// The draft had no id and a new nap was stored.
    Created(Nap),
    /// An existing nap was overwritten.
    Updated(Nap),
}

impl UpsertOutcome {
    /// The stored nap, whichever branch produced it.
    pub fn nap(&self) -> &Nap {
        match self {
            Self::Created(nap) | Self::Updated(nap) => nap,
        }
    }

    /// Consume the outcome and return the stored nap.
    pub fn into_nap(self) -> Nap {
        match self {
            Self::Created(nap) | Self::Updated(nap) => nap,
        }
    }
}

/// Driving port for nap writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NapCommand: Send + Sync {
    /// Store a new nap owned according to the caller's role.
    async fn create(&self, request: CreateNapRequest) -> Result<Nap, Error>;

    /// Overwrite an existing nap, or create one when no id is supplied.
    async fn update(&self, request: UpdateNapRequest) -> Result<UpsertOutcome, Error>;

    /// Remove a nap.
    async fn delete(&self, request: DeleteNapRequest) -> Result<(), Error>;
}
