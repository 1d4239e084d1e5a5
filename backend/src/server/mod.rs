//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::build_metrics;
pub use settings::AppSettings;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use napchart::Trace;
#[cfg(debug_assertions)]
use napchart::doc::ApiDoc;
use napchart::inbound::http::date_durations::list_user_date_durations;
use napchart::inbound::http::duration_ratings::list_duration_ratings;
use napchart::inbound::http::health::{HealthState, live, ready};
use napchart::inbound::http::naps::{
    create_nap, delete_nap, get_nap, list_naps, list_user_naps, update_nap,
};
use napchart::inbound::http::state::HttpState;
use napchart::inbound::http::users::{account, login, logout};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    // `/naps/user` must be registered ahead of `/naps/{id}`.
    let api = web::scope("/api")
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
        .service(list_duration_ratings);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server for the resolved configuration.
///
/// Readiness is flagged once the listener is bound. The returned [`Server`]
/// must be awaited to drive it.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(config.db_pool.as_ref()));
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::new(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
