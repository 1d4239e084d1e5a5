//! Port for nap persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Login, Nap, NapId, ResolvedNap};

use super::define_port_error;

define_port_error! {
    /// Errors raised by nap repository adapters.
    pub enum NapRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "nap repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "nap repository query failed: {message}",
        /// The owner login has no user record behind it.
        UnknownOwner { owner: String } => "no user record for nap owner {owner}",
        /// A store constraint rejected the nap's values.
        Rejected { message: String } => "nap rejected by the store: {message}",
        /// An update targeted a row that no longer exists.
        Missing { id: i64 } => "nap {id} does not exist",
    }
}

/// Storage for nap records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NapRepository: Send + Sync {
    /// Insert when `nap` has no id, update the row with that id otherwise.
    async fn save(&self, nap: &ResolvedNap) -> Result<Nap, NapRepositoryError>;

    /// Fetch one nap.
    async fn find_by_id(&self, id: NapId) -> Result<Option<Nap>, NapRepositoryError>;

    /// Page over every nap in ascending id order.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Nap>, NapRepositoryError>;

    /// Page over the naps owned by `owner` in ascending id order.
    async fn find_by_owner(
        &self,
        owner: &Login,
        page: PageRequest,
    ) -> Result<Page<Nap>, NapRepositoryError>;

    /// Remove a nap. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: NapId) -> Result<(), NapRepositoryError>;
}

/// Stateless stand-in used when no database is configured.
///
/// Saves echo the nap back (new naps get id 1); reads find nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNapRepository;

#[async_trait]
impl NapRepository for FixtureNapRepository {
    async fn save(&self, nap: &ResolvedNap) -> Result<Nap, NapRepositoryError> {
        let id = match nap.id() {
            Some(id) => id,
            None => NapId::new(1).map_err(|err| NapRepositoryError::query(err.to_string()))?,
        };
        Ok(Nap::new(id, nap.owner().clone(), nap.details().clone()))
    }

    async fn find_by_id(&self, _id: NapId) -> Result<Option<Nap>, NapRepositoryError> {
        Ok(None)
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Nap>, NapRepositoryError> {
        Ok(Page::empty(page))
    }

    async fn find_by_owner(
        &self,
        _owner: &Login,
        page: PageRequest,
    ) -> Result<Page<Nap>, NapRepositoryError> {
        Ok(Page::empty(page))
    }

    async fn delete_by_id(&self, _id: NapId) -> Result<(), NapRepositoryError> {
        Ok(())
    }
}
