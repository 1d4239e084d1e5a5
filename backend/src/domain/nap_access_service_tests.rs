//! Tests for the nap access service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pagination::{Page, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockNapRepository, MockUserDirectory};
use crate::domain::{ErrorCode, Login, NapDetails, Role, User};

fn login(raw: &str) -> Login {
    Login::new(raw).expect("valid login")
}

fn nap_id(raw: i64) -> NapId {
    NapId::new(raw).expect("valid id")
}

fn thirty_minutes() -> NapDetails {
    NapDetails {
        duration: Some(30.0),
        ..NapDetails::default()
    }
}

fn stored(id: i64, owner: &str) -> Nap {
    Nap::new(nap_id(id), login(owner), thirty_minutes())
}

/// Echo the resolved nap back as stored, assigning `new_id` to inserts.
fn echo_save(repo: &mut MockNapRepository, new_id: i64) {
    repo.expect_save().returning(move |nap| {
        Ok(Nap::new(
            nap.id().unwrap_or_else(|| nap_id(new_id)),
            nap.owner().clone(),
            nap.details().clone(),
        ))
    });
}

fn directory_with(user: Option<User>) -> MockUserDirectory {
    let mut users = MockUserDirectory::new();
    users
        .expect_find_by_login()
        .returning(move |_| Ok(user.clone()));
    users
}

fn service(
    naps: MockNapRepository,
    users: MockUserDirectory,
) -> NapAccessService<MockNapRepository, MockUserDirectory> {
    NapAccessService::new(Arc::new(naps), Arc::new(users))
}

#[fixture]
fn alice() -> Principal {
    Principal::new(login("alice"), [Role::User])
}

#[fixture]
fn admin() -> Principal {
    Principal::new(login("admin1"), [Role::Admin, Role::User])
}

fn alice_user() -> User {
    User::new(7, login("alice"))
}

fn draft_for_bob() -> NapDraft {
    NapDraft::new(thirty_minutes()).with_owner(login("bob"))
}

#[rstest]
#[tokio::test]
async fn non_admin_create_forces_owner(alice: Principal) {
    let mut naps = MockNapRepository::new();
    echo_save(&mut naps, 1);
    let service = service(naps, directory_with(Some(alice_user())));

    let nap = service
        .create(CreateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(nap.owner(), &login("alice"));
    assert_eq!(nap.details().duration, Some(30.0));
    assert_eq!(nap.id(), nap_id(1));
}

#[rstest]
#[tokio::test]
async fn admin_create_preserves_owner(admin: Principal) {
    let mut naps = MockNapRepository::new();
    echo_save(&mut naps, 1);
    let mut users = MockUserDirectory::new();
    users.expect_find_by_login().times(0);
    let service = service(naps, users);

    let nap = service
        .create(CreateNapRequest {
            principal: Some(admin),
            nap: draft_for_bob(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(nap.owner(), &login("bob"));
}

#[rstest]
#[tokio::test]
async fn create_without_principal_is_unauthenticated() {
    let mut naps = MockNapRepository::new();
    naps.expect_save().times(0);
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .create(CreateNapRequest {
            principal: None,
            nap: draft_for_bob(),
        })
        .await
        .expect_err("unauthenticated");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
}

#[rstest]
#[tokio::test]
async fn create_with_id_is_invalid(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_save().times(0);
    let service = service(naps, directory_with(Some(alice_user())));

    let err = service
        .create(CreateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob().with_id(nap_id(3)),
        })
        .await
        .expect_err("id rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_without_user_record_fails_owner_resolution(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_save().times(0);
    let service = service(naps, directory_with(None));

    let err = service
        .create(CreateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob(),
        })
        .await
        .expect_err("owner resolution fails");

    assert_eq!(err.code(), ErrorCode::OwnerResolutionFailed);
}

#[rstest]
#[tokio::test]
async fn update_without_id_creates(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id().times(0);
    echo_save(&mut naps, 11);
    let service = service(naps, directory_with(Some(alice_user())));

    let outcome = service
        .update(UpdateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob(),
        })
        .await
        .expect("upsert succeeds");

    match outcome {
        UpsertOutcome::Created(nap) => {
            assert_eq!(nap.id(), nap_id(11));
            assert_eq!(nap.owner(), &login("alice"));
        }
        UpsertOutcome::Updated(nap) => panic!("expected creation, got update of {}", nap.id()),
    }
}

#[rstest]
#[tokio::test]
async fn update_with_id_keeps_identifier(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .withf(|id| id.get() == 5)
        .return_once(|_| Ok(Some(stored(5, "alice"))));
    echo_save(&mut naps, 99);
    let service = service(naps, directory_with(Some(alice_user())));

    let outcome = service
        .update(UpdateNapRequest {
            principal: Some(alice),
            nap: NapDraft::new(NapDetails {
                rating: Some(4),
                ..NapDetails::default()
            })
            .with_id(nap_id(5)),
        })
        .await
        .expect("update succeeds");

    assert!(matches!(outcome, UpsertOutcome::Updated(_)));
    let nap = outcome.into_nap();
    assert_eq!(nap.id(), nap_id(5));
    assert_eq!(nap.details().rating, Some(4));
}

#[rstest]
#[tokio::test]
async fn update_of_missing_nap_is_not_found(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id().return_once(|_| Ok(None));
    naps.expect_save().times(0);
    let service = service(naps, directory_with(Some(alice_user())));

    let err = service
        .update(UpdateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob().with_id(nap_id(5)),
        })
        .await
        .expect_err("missing nap");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_of_foreign_nap_is_forbidden(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .return_once(|_| Ok(Some(stored(99, "bob"))));
    naps.expect_save().times(0);
    let service = service(naps, directory_with(Some(alice_user())));

    let err = service
        .update(UpdateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob().with_id(nap_id(99)),
        })
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn admin_cannot_reassign_owner(admin: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .return_once(|_| Ok(Some(stored(99, "carol"))));
    naps.expect_save().times(0);
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .update(UpdateNapRequest {
            principal: Some(admin),
            nap: draft_for_bob().with_id(nap_id(99)),
        })
        .await
        .expect_err("reassignment rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn get_by_non_owner_is_forbidden(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .withf(|id| id.get() == 99)
        .return_once(|_| Ok(Some(stored(99, "bob"))));
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .get(GetNapRequest {
            principal: Some(alice),
            id: nap_id(99),
        })
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn admin_gets_any_nap(admin: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .return_once(|_| Ok(Some(stored(99, "bob"))));
    let service = service(naps, MockUserDirectory::new());

    let nap = service
        .get(GetNapRequest {
            principal: Some(admin),
            id: nap_id(99),
        })
        .await
        .expect("admin may read");

    assert_eq!(nap.owner(), &login("bob"));
}

#[rstest]
#[case(None, ErrorCode::NotFound)]
#[case(Some("bob"), ErrorCode::Unauthenticated)]
#[tokio::test]
async fn anonymous_get_checks_existence_first(
    #[case] owner: Option<&'static str>,
    #[case] expected: ErrorCode,
) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .return_once(move |_| Ok(owner.map(|owner| stored(3, owner))));
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .get(GetNapRequest {
            principal: None,
            id: nap_id(3),
        })
        .await
        .expect_err("anonymous read fails");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn delete_twice_reports_not_found(alice: Principal) {
    let deleted = Arc::new(AtomicBool::new(false));
    let mut naps = MockNapRepository::new();
    let seen = Arc::clone(&deleted);
    naps.expect_find_by_id().returning(move |_| {
        Ok((!seen.load(Ordering::SeqCst)).then(|| stored(4, "alice")))
    });
    let mark = Arc::clone(&deleted);
    naps.expect_delete_by_id().times(1).returning(move |_| {
        mark.store(true, Ordering::SeqCst);
        Ok(())
    });
    let service = service(naps, MockUserDirectory::new());
    let request = DeleteNapRequest {
        principal: Some(alice),
        id: nap_id(4),
    };

    service
        .delete(request.clone())
        .await
        .expect("first delete succeeds");
    let err = service
        .delete(request)
        .await
        .expect_err("second delete fails");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_of_foreign_nap_is_forbidden(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_id()
        .return_once(|_| Ok(Some(stored(4, "bob"))));
    naps.expect_delete_by_id().times(0);
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .delete(DeleteNapRequest {
            principal: Some(alice),
            id: nap_id(4),
        })
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn non_admin_list_is_owner_scoped(alice: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_all().times(0);
    naps.expect_find_by_owner()
        .withf(|owner, page| owner.as_ref() == "alice" && page.page() == 1)
        .return_once(|_, page| Ok(Page::new(vec![stored(1, "alice")], 21, page)));
    let service = service(naps, MockUserDirectory::new());

    let page = service
        .list(ListNapsRequest {
            principal: Some(alice),
            page: PageRequest::default().with_page(1),
        })
        .await
        .expect("list succeeds");

    assert_eq!(page.total(), 21);
    assert!(page.items().iter().all(|nap| nap.owner().as_ref() == "alice"));
}

#[rstest]
#[tokio::test]
async fn admin_list_is_global(admin: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_by_owner().times(0);
    naps.expect_find_all().return_once(|page| {
        Ok(Page::new(
            vec![stored(1, "alice"), stored(2, "bob")],
            2,
            page,
        ))
    });
    let service = service(naps, MockUserDirectory::new());

    let page = service
        .list(ListNapsRequest {
            principal: Some(admin),
            page: PageRequest::default(),
        })
        .await
        .expect("list succeeds");

    assert_eq!(page.items().len(), 2);
}

#[rstest]
#[tokio::test]
async fn admin_list_owned_is_scoped(admin: Principal) {
    let mut naps = MockNapRepository::new();
    naps.expect_find_all().times(0);
    naps.expect_find_by_owner()
        .withf(|owner, _| owner.as_ref() == "admin1")
        .return_once(|_, page| Ok(Page::empty(page)));
    let service = service(naps, MockUserDirectory::new());

    service
        .list_owned(ListNapsRequest {
            principal: Some(admin),
            page: PageRequest::default(),
        })
        .await
        .expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn list_without_principal_is_unauthenticated() {
    let mut naps = MockNapRepository::new();
    naps.expect_find_all().times(0);
    naps.expect_find_by_owner().times(0);
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .list(ListNapsRequest {
            principal: None,
            page: PageRequest::default(),
        })
        .await
        .expect_err("unauthenticated");

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
}

#[rstest]
#[case(NapRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(NapRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(NapRepositoryError::unknown_owner("bob"), ErrorCode::InvalidRequest)]
#[case(NapRepositoryError::rejected("check constraint violated"), ErrorCode::InvalidRequest)]
#[case(NapRepositoryError::missing(5_i64), ErrorCode::NotFound)]
#[tokio::test]
async fn store_failures_propagate(
    admin: Principal,
    #[case] failure: NapRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut naps = MockNapRepository::new();
    naps.expect_save().return_once(move |_| Err(failure));
    let service = service(naps, MockUserDirectory::new());

    let err = service
        .create(CreateNapRequest {
            principal: Some(admin),
            nap: draft_for_bob(),
        })
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn directory_outage_is_service_unavailable(alice: Principal) {
    let mut users = MockUserDirectory::new();
    users
        .expect_find_by_login()
        .return_once(|_| Err(UserDirectoryError::connection("timeout")));
    let mut naps = MockNapRepository::new();
    naps.expect_save().times(0);
    let service = service(naps, users);

    let err = service
        .create(CreateNapRequest {
            principal: Some(alice),
            nap: draft_for_bob(),
        })
        .await
        .expect_err("directory failure surfaces");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
