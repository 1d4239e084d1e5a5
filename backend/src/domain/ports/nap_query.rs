//! Driving port for nap reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Nap, NapId, Principal};

/// Request for a page of naps.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNapsRequest {
    pub principal: Option<Principal>,
    pub page: PageRequest,
}

/// Request for a single nap.
#[derive(Debug, Clone, PartialEq)]
pub struct GetNapRequest {
    pub principal: Option<Principal>,
    pub id: NapId,
}

/// Driving port for nap reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NapQuery: Send + Sync {
    /// Admins page over every nap; everyone else over their own.
    async fn list(&self, request: ListNapsRequest) -> Result<Page<Nap>, Error>;

    /// Page over the caller's own naps regardless of role.
    async fn list_owned(&self, request: ListNapsRequest) -> Result<Page<Nap>, Error>;

    /// Fetch one nap the caller may see.
    async fn get(&self, request: GetNapRequest) -> Result<Nap, Error>;
}
