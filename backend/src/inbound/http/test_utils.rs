//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;

use crate::domain::ports::{
    DateDurationQuery, DurationRatingQuery, FixtureLoginService, NapCommand, NapQuery,
};
use crate::inbound::http::state::HttpState;

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state over the fixture login service and the given ports.
pub fn state_with(
    naps: Arc<dyn NapCommand>,
    naps_query: Arc<dyn NapQuery>,
    date_durations: Arc<dyn DateDurationQuery>,
    duration_ratings: Arc<dyn DurationRatingQuery>,
) -> HttpState {
    HttpState {
        login: Arc::new(FixtureLoginService),
        naps,
        naps_query,
        date_durations,
        duration_ratings,
    }
}

/// Log in through `POST /api/login` and return the session cookie.
pub async fn login_cookie<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    session_cookie(&response)
}
