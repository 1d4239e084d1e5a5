//! End-to-end HTTP tests over the real services and an in-memory store.
//!
//! Exercises login, the nap CRUD surface and the derived duration endpoints
//! through the same middleware stack the server installs.

#[expect(dead_code, reason = "the BDD suite uses a different subset of the store helpers")]
mod support;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use napchart::Trace;
use napchart::domain::ports::FixtureLoginService;
use napchart::domain::{
    DurationAccessService, DurationRatingService, NapAccessService, NapDetails, TRACE_ID_HEADER,
};
use napchart::inbound::http::alerts::ALERT_HEADER;
use napchart::inbound::http::date_durations::list_user_date_durations;
use napchart::inbound::http::duration_ratings::list_duration_ratings;
use napchart::inbound::http::naps::{
    create_nap, delete_nap, get_nap, list_naps, list_user_naps, update_nap,
};
use napchart::inbound::http::state::HttpState;
use napchart::inbound::http::users::{account, login, logout};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use support::{MemoryStore, at};

#[fixture]
fn store() -> Arc<MemoryStore> {
    MemoryStore::with_users(["admin", "user", "other"])
}

fn state(store: &Arc<MemoryStore>) -> HttpState {
    HttpState::with_nap_service(
        Arc::new(FixtureLoginService),
        Arc::new(NapAccessService::new(store.clone(), store.clone())),
        Arc::new(DurationAccessService::new(store.clone())),
        Arc::new(DurationRatingService::new(store.clone())),
    )
}

async fn app(
    store: &Arc<MemoryStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state(store)))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .wrap(session)
                    .service(login)
                    .service(logout)
                    .service(account)
                    .service(create_nap)
                    .service(update_nap)
                    .service(list_naps)
                    .service(list_user_naps)
                    .service(get_nap)
                    .service(delete_nap)
                    .service(list_user_date_durations)
                    .service(list_duration_ratings),
            ),
    )
    .await
}

async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": username, "password": username }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn header(res: &ServiceResponse, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn details(start: &str, duration: f64, rating: i32) -> NapDetails {
    NapDetails {
        start: Some(at(start)),
        end: None,
        duration: Some(duration),
        rating: Some(rating),
    }
}

#[rstest]
#[actix_web::test]
async fn user_creates_and_reads_back_their_own_nap(store: Arc<MemoryStore>) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/naps")
            .cookie(cookie.clone())
            .set_json(json!({
                "owner": "admin",
                "start": "2024-05-01T13:00:00Z",
                "duration": 1.5,
                "rating": 4
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(header(&created, "location").as_deref(), Some("/api/naps/1"));
    assert_eq!(
        header(&created, ALERT_HEADER).as_deref(),
        Some("napchartApp.nap.created")
    );
    let body: Value = test::read_body_json(created).await;
    assert_eq!(body["owner"], "user", "claimed owner is ignored for users");

    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/naps/1")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body: Value = test::read_body_json(fetched).await;
    assert_eq!(body["rating"], 4);
}

#[rstest]
#[actix_web::test]
async fn foreign_naps_are_forbidden_but_visible_to_admins(store: Arc<MemoryStore>) {
    let nap = store.seed("other", details("2024-05-01T13:00:00Z", 1.0, 3));
    let app = app(&store).await;
    let uri = format!("/api/naps/{}", nap.id());

    let user = sign_in(&app, "user").await;
    for req in [
        test::TestRequest::get().uri(&uri),
        test::TestRequest::delete().uri(&uri),
    ] {
        let res = test::call_service(&app, req.cookie(user.clone()).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let trace_id = header(&res, TRACE_ID_HEADER).expect("trace id");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "forbidden");
        assert_eq!(body["traceId"], trace_id.as_str());
    }
    assert!(store.stored(nap.id()).is_some());

    let admin = sign_in(&app, "admin").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(&uri).cookie(admin).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn put_without_id_creates_and_with_id_updates(store: Arc<MemoryStore>) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let created = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/naps")
            .cookie(cookie.clone())
            .set_json(json!({ "duration": 0.5 }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(created).await;
    let id = body["id"].as_i64().expect("assigned id");

    let updated = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/naps")
            .cookie(cookie)
            .set_json(json!({ "id": id, "duration": 2.0, "rating": 5 }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(
        header(&updated, ALERT_HEADER).as_deref(),
        Some("napchartApp.nap.updated")
    );
    assert_eq!(store.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn admin_creation_requires_an_existing_owner(store: Arc<MemoryStore>) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "admin").await;

    let missing = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/naps")
            .cookie(cookie.clone())
            .set_json(json!({ "duration": 1.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/naps")
            .cookie(cookie.clone())
            .set_json(json!({ "owner": "ghost", "duration": 1.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let ok = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/naps")
            .cookie(cookie)
            .set_json(json!({ "owner": "other", "duration": 1.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(ok).await;
    assert_eq!(body["owner"], "other");
}

#[rstest]
#[case(json!({ "duration": -5.0 }))]
#[case(json!({ "duration": 1e12 }))]
#[actix_web::test]
async fn out_of_range_durations_are_rejected_before_storage(
    store: Arc<MemoryStore>,
    #[case] payload: Value,
) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/naps")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_duration");
    assert_eq!(store.len(), 0);
}

#[rstest]
#[case("/api/naps/0")]
#[case("/api/naps/-1")]
#[actix_web::test]
async fn unassignable_ids_are_not_found(store: Arc<MemoryStore>, #[case] uri: &str) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn listing_is_scoped_to_the_caller_unless_admin(store: Arc<MemoryStore>) {
    store.seed("user", details("2024-05-01T13:00:00Z", 1.0, 3));
    store.seed("other", details("2024-05-01T15:00:00Z", 1.0, 4));
    store.seed("user", details("2024-05-02T13:00:00Z", 2.0, 5));
    let app = app(&store).await;

    let user = sign_in(&app, "user").await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/naps?size=1")
            .cookie(user)
            .to_request(),
    )
    .await;
    assert_eq!(header(&res, "x-total-count").as_deref(), Some("2"));
    let link = header(&res, "link").expect("link header");
    assert!(link.contains("rel=\"next\""));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let admin = sign_in(&app, "admin").await;
    let all = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/naps")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(header(&all, "x-total-count").as_deref(), Some("3"));

    let own = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/naps/user")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(header(&own, "x-total-count").as_deref(), Some("0"));
}

#[rstest]
#[actix_web::test]
async fn duration_endpoints_aggregate_stored_naps(store: Arc<MemoryStore>) {
    store.seed("user", details("2024-05-01T09:00:00Z", 1.0, 3));
    store.seed("user", details("2024-05-01T14:00:00Z", 1.2, 4));
    store.seed("other", details("2024-05-01T14:00:00Z", 2.0, 5));
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/date-durations/user")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let days = body.as_array().expect("array");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["id"], "user:2024-05-01");
    assert_eq!(days[0]["localDate"], "2024-05-01");
    let total = days[0]["totalDuration"].as_f64().expect("total");
    assert!((total - 2.2).abs() < 1e-9);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/duration-ratings")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!([
            { "duration": 1, "averageRating": 3.5 },
            { "duration": 2, "averageRating": 5.0 }
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(store: Arc<MemoryStore>) {
    let app = app(&store).await;
    let cookie = sign_in(&app, "user").await;

    let out = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(out.status().is_success());
    let cleared = out
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/account")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
