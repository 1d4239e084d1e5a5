//! Ownership-scoped nap CRUD.
//!
//! The service implements both nap driving ports over a [`NapRepository`]
//! and a [`UserDirectory`]. Every operation settles who is calling before it
//! touches a record; the rules themselves live in [`crate::domain::access`].

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::access::{authorize, require_principal, resolve_owner};
use crate::domain::ports::{
    CreateNapRequest, DeleteNapRequest, GetNapRequest, ListNapsRequest, NapCommand, NapQuery,
    NapRepository, NapRepositoryError, UpdateNapRequest, UpsertOutcome, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{Error, Nap, NapDraft, NapId, Principal, ResolvedNap};

fn map_repository_error(error: NapRepositoryError) -> Error {
    match error {
        NapRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("nap repository unavailable: {message}"))
        }
        NapRepositoryError::Query { message } => {
            Error::internal(format!("nap repository error: {message}"))
        }
        NapRepositoryError::UnknownOwner { owner } => {
            Error::invalid_request(format!("nap owner {owner} does not exist"))
                .with_details(json!({ "field": "owner", "code": "unknown_owner" }))
        }
        NapRepositoryError::Rejected { message } => {
            Error::invalid_request(format!("nap values rejected: {message}"))
                .with_details(json!({ "field": "duration", "code": "invalid_duration" }))
        }
        NapRepositoryError::Missing { id } => Error::not_found(format!("nap {id} not found")),
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Nap service enforcing ownership rules.
#[derive(Clone)]
pub struct NapAccessService<R, D> {
    naps: Arc<R>,
    users: Arc<D>,
}

impl<R, D> NapAccessService<R, D> {
    /// Create a service over a nap store and a user directory.
    pub fn new(naps: Arc<R>, users: Arc<D>) -> Self {
        Self { naps, users }
    }
}

impl<R, D> NapAccessService<R, D>
where
    R: NapRepository,
    D: UserDirectory,
{
    /// Settle the draft's owner. Admins skip the directory lookup.
    async fn resolve(&self, draft: NapDraft, principal: &Principal) -> Result<ResolvedNap, Error> {
        if principal.is_admin() {
            return resolve_owner(draft, principal, None);
        }
        let user = self
            .users
            .find_by_login(principal.login())
            .await
            .map_err(map_directory_error)?;
        if user.is_none() {
            warn!(login = %principal.login(), "authenticated login has no user record");
        }
        resolve_owner(draft, principal, user.as_ref())
    }

    async fn load(&self, id: NapId) -> Result<Nap, Error> {
        self.naps
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("nap {id} not found")))
    }

    async fn persist_new(&self, nap: &ResolvedNap) -> Result<Nap, Error> {
        let stored = self.naps.save(nap).await.map_err(map_repository_error)?;
        info!(nap_id = %stored.id(), owner = %stored.owner(), "nap created");
        Ok(stored)
    }

    async fn persist_existing(
        &self,
        id: NapId,
        nap: &ResolvedNap,
        principal: &Principal,
    ) -> Result<Nap, Error> {
        let existing = self.load(id).await?;
        authorize(principal, &existing)?;
        if existing.owner() != nap.owner() {
            return Err(Error::invalid_request("nap owner cannot be reassigned").with_details(
                json!({ "field": "owner", "code": "owner_immutable" }),
            ));
        }
        let stored = self.naps.save(nap).await.map_err(map_repository_error)?;
        info!(nap_id = %stored.id(), owner = %stored.owner(), "nap updated");
        Ok(stored)
    }
}

#[async_trait]
impl<R, D> NapCommand for NapAccessService<R, D>
where
    R: NapRepository,
    D: UserDirectory,
{
    async fn create(&self, request: CreateNapRequest) -> Result<Nap, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        let nap = self.resolve(request.nap, principal).await?;
        if nap.id().is_some() {
            return Err(
                Error::invalid_request("a new nap cannot already have an id")
                    .with_details(json!({ "field": "id", "code": "id_exists" })),
            );
        }
        self.persist_new(&nap).await
    }

    async fn update(&self, request: UpdateNapRequest) -> Result<UpsertOutcome, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        let nap = self.resolve(request.nap, principal).await?;
        match nap.id() {
            None => self.persist_new(&nap).await.map(UpsertOutcome::Created),
            Some(id) => self
                .persist_existing(id, &nap, principal)
                .await
                .map(UpsertOutcome::Updated),
        }
    }

    async fn delete(&self, request: DeleteNapRequest) -> Result<(), Error> {
        let existing = self.load(request.id).await?;
        let principal = require_principal(request.principal.as_ref())?;
        authorize(principal, &existing)?;
        self.naps
            .delete_by_id(request.id)
            .await
            .map_err(map_repository_error)?;
        info!(nap_id = %request.id, login = %principal.login(), "nap deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, D> NapQuery for NapAccessService<R, D>
where
    R: NapRepository,
    D: UserDirectory,
{
    async fn list(&self, request: ListNapsRequest) -> Result<Page<Nap>, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        let result = if principal.is_admin() {
            self.naps.find_all(request.page).await
        } else {
            self.naps.find_by_owner(principal.login(), request.page).await
        };
        result.map_err(map_repository_error)
    }

    async fn list_owned(&self, request: ListNapsRequest) -> Result<Page<Nap>, Error> {
        let principal = require_principal(request.principal.as_ref())?;
        self.naps
            .find_by_owner(principal.login(), request.page)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, request: GetNapRequest) -> Result<Nap, Error> {
        let nap = self.load(request.id).await?;
        let principal = require_principal(request.principal.as_ref())?;
        authorize(principal, &nap)?;
        Ok(nap)
    }
}

#[cfg(test)]
#[path = "nap_access_service_tests.rs"]
mod tests;
