//! Ownership rules shared by the nap and duration services.
//!
//! Everything here is pure: no store access, no logging. Services look up
//! whatever records are needed and pass them in.

use serde_json::json;

use super::{Error, Login, Nap, NapDraft, Principal, ResolvedNap, User};

/// Unwrap the principal or fail with [`crate::domain::ErrorCode::Unauthenticated`].
pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, Error> {
    principal.ok_or_else(|| Error::unauthenticated("login required"))
}

/// Whether `principal` may act on a record owned by `owner`.
///
/// Admins may act on anything; everyone else only on their own records.
///
/// # Examples
/// ```
/// use napchart::domain::{access::can_access, Login, Principal, Role};
///
/// let alice = Principal::new(Login::new("alice").unwrap(), [Role::User]);
/// assert!(can_access(&alice, &Login::new("alice").unwrap()));
/// assert!(!can_access(&alice, &Login::new("bob").unwrap()));
/// ```
pub fn can_access(principal: &Principal, owner: &Login) -> bool {
    principal.is_admin() || principal.login() == owner
}

/// Fail with `Forbidden` unless `principal` may act on `nap`.
pub fn authorize(principal: &Principal, nap: &Nap) -> Result<(), Error> {
    if can_access(principal, nap.owner()) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "nap {} belongs to another user",
            nap.id()
        )))
    }
}

/// Settle the owner of a draft for the acting principal.
///
/// Admins keep the owner they supplied; a draft without one is rejected.
/// For everyone else the supplied owner is discarded and replaced by the
/// principal's own user record, which the caller looks up beforehand and
/// passes as `principal_user`. A missing record means the login has no user
/// behind it.
///
/// # Examples
/// ```
/// use napchart::domain::{access::resolve_owner, Login, NapDetails, NapDraft, Principal, Role, User};
///
/// let alice = Login::new("alice").unwrap();
/// let principal = Principal::new(alice.clone(), [Role::User]);
/// let draft = NapDraft::new(NapDetails::default()).with_owner(Login::new("bob").unwrap());
///
/// let resolved = resolve_owner(draft, &principal, Some(&User::new(2, alice.clone()))).unwrap();
/// assert_eq!(resolved.owner(), &alice);
/// ```
pub fn resolve_owner(
    draft: NapDraft,
    principal: &Principal,
    principal_user: Option<&User>,
) -> Result<ResolvedNap, Error> {
    let NapDraft { id, owner, details } = draft;
    let owner = if principal.is_admin() {
        owner.ok_or_else(|| {
            Error::invalid_request("nap owner is required")
                .with_details(json!({ "field": "owner", "code": "missing_owner" }))
        })?
    } else {
        let user = principal_user.ok_or_else(|| {
            Error::owner_resolution_failed(format!(
                "no user record for login {}",
                principal.login()
            ))
        })?;
        user.login().clone()
    };
    Ok(ResolvedNap::new(id, owner, details))
}
