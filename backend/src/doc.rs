//! OpenAPI document for the REST API.
//!
//! Registers every handler under `inbound::http`, the adapter-side schema
//! wrappers for domain errors, and the session cookie security scheme. Served
//! by Swagger UI in debug builds and written out by the `openapi-dump` binary.

use crate::inbound::http::date_durations::DateDurationBody;
use crate::inbound::http::duration_ratings::DurationRatingBody;
use crate::inbound::http::naps::NapBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{AccountBody, LoginRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the `SessionCookie` security scheme referenced by the handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the napchart API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Napchart API",
        description = "Record naps and read sleep summaries. Every nap belongs to one user; \
                       only its owner or an administrator may read or change it."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::account,
        crate::inbound::http::naps::create_nap,
        crate::inbound::http::naps::update_nap,
        crate::inbound::http::naps::list_naps,
        crate::inbound::http::naps::list_user_naps,
        crate::inbound::http::naps::get_nap,
        crate::inbound::http::naps::delete_nap,
        crate::inbound::http::date_durations::list_user_date_durations,
        crate::inbound::http::duration_ratings::list_duration_ratings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        AccountBody,
        NapBody,
        DateDurationBody,
        DurationRatingBody
    )),
    tags(
        (name = "account", description = "Login, logout and the current principal"),
        (name = "naps", description = "Owner-scoped nap records"),
        (name = "durations", description = "Derived sleep summaries"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
