//! Account handlers.
//!
//! ```text
//! POST /api/login {"username":"user","password":"user"}
//! GET /api/account
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError, Principal, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// The authenticated account as seen by the client.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountBody {
    #[schema(example = "user")]
    pub login: String,
    #[schema(example = json!(["ROLE_USER"]))]
    pub authorities: Vec<String>,
}

impl From<&Principal> for AccountBody {
    fn from(value: &Principal) -> Self {
        Self {
            login: value.login().to_string(),
            authorities: value
                .roles()
                .iter()
                .map(Role::as_str)
                .map(str::to_owned)
                .collect(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["account"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountBody>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    Ok(web::Json(AccountBody::from(&principal)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["account"],
    operation_id = "logout",
    security(("SessionCookie" = []))
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Current principal.
#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "Current account", body = AccountBody),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["account"],
    operation_id = "getAccount",
    security(("SessionCookie" = []))
)]
#[get("/account")]
pub async fn account(session: SessionContext) -> ApiResult<web::Json<AccountBody>> {
    let principal = session.require_principal()?;
    Ok(web::Json(AccountBody::from(&principal)))
}
