//! Nap HTTP handlers.
//!
//! ```text
//! POST   /api/naps
//! PUT    /api/naps
//! GET    /api/naps?page=0&size=20
//! GET    /api/naps/user?page=0&size=20
//! GET    /api/naps/{id}
//! DELETE /api/naps/{id}
//! ```
//!
//! Handlers pass whatever principal the session holds, or none, straight to
//! the nap ports; authentication and ownership decisions belong there.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateNapRequest, DeleteNapRequest, GetNapRequest, ListNapsRequest, UpdateNapRequest,
    UpsertOutcome,
};
use crate::domain::{Error, Nap, NapDetails, NapDraft, NapId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::alerts::{EntityAction, with_entity_alert};
use crate::inbound::http::pagination::{PageQuery, paged_response};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_nap_id, parse_optional_duration, parse_optional_login,
    parse_optional_rfc3339_timestamp,
};

const ENTITY: &str = "nap";
const NAPS_PATH: &str = "/api/naps";
const USER_NAPS_PATH: &str = "/api/naps/user";

/// Nap payload used for requests and responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NapBody {
    /// Absent when creating.
    #[schema(example = 12)]
    pub id: Option<i64>,
    /// Owning login. Ignored unless the caller is an admin.
    #[schema(example = "user")]
    pub owner: Option<String>,
    #[schema(format = "date-time")]
    pub start: Option<String>,
    #[schema(format = "date-time")]
    pub end: Option<String>,
    /// Hours slept.
    #[schema(example = 1.5)]
    pub duration: Option<f64>,
    #[schema(example = 4)]
    pub rating: Option<i32>,
}

impl From<Nap> for NapBody {
    fn from(value: Nap) -> Self {
        let (id, owner, details) = value.into_parts();
        Self {
            id: Some(id.get()),
            owner: Some(owner.into()),
            start: details.start.map(|ts| ts.to_rfc3339()),
            end: details.end.map(|ts| ts.to_rfc3339()),
            duration: details.duration,
            rating: details.rating,
        }
    }
}

fn parse_nap_body(body: NapBody) -> Result<NapDraft, Error> {
    let details = NapDetails {
        start: parse_optional_rfc3339_timestamp(body.start, FieldName::new("start"))?,
        end: parse_optional_rfc3339_timestamp(body.end, FieldName::new("end"))?,
        duration: parse_optional_duration(body.duration, FieldName::new("duration"))?,
        rating: body.rating,
    };
    Ok(NapDraft {
        id: body
            .id
            .map(|raw| parse_nap_id(raw, FieldName::new("id")))
            .transpose()?,
        owner: parse_optional_login(body.owner, FieldName::new("owner"))?,
        details,
    })
}

/// Ids that can never have been assigned name a nap that does not exist.
fn path_id(raw: i64) -> Result<NapId, Error> {
    NapId::new(raw).map_err(|_| Error::not_found(format!("nap {raw} not found")))
}

fn created(nap: Nap) -> HttpResponse {
    let id = nap.id();
    let mut builder = HttpResponse::Created();
    with_entity_alert(&mut builder, ENTITY, EntityAction::Created, id)
        .insert_header((LOCATION, format!("{NAPS_PATH}/{id}")))
        .json(NapBody::from(nap))
}

/// Record a nap.
///
/// Non-admin callers always own the nap they create; admins name the owner.
#[utoipa::path(
    post,
    path = "/api/naps",
    request_body = NapBody,
    responses(
        (status = 201, description = "Nap created", body = NapBody,
            headers(("Location" = String, description = "URL of the new nap"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 422, description = "Caller has no user record", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "createNap",
    security(("SessionCookie" = []))
)]
#[post("/naps")]
pub async fn create_nap(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NapBody>,
) -> ApiResult<HttpResponse> {
    let nap = parse_nap_body(payload.into_inner())?;
    let stored = state
        .naps
        .create(CreateNapRequest {
            principal: session.principal()?,
            nap,
        })
        .await?;
    Ok(created(stored))
}

/// Update a nap, or create it when the body has no id.
#[utoipa::path(
    put,
    path = "/api/naps",
    request_body = NapBody,
    responses(
        (status = 200, description = "Nap updated", body = NapBody),
        (status = 201, description = "Nap created", body = NapBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Nap belongs to another user", body = ErrorSchema),
        (status = 404, description = "Nap not found", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "updateNap",
    security(("SessionCookie" = []))
)]
#[put("/naps")]
pub async fn update_nap(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NapBody>,
) -> ApiResult<HttpResponse> {
    let nap = parse_nap_body(payload.into_inner())?;
    let outcome = state
        .naps
        .update(UpdateNapRequest {
            principal: session.principal()?,
            nap,
        })
        .await?;
    Ok(match outcome {
        UpsertOutcome::Created(nap) => created(nap),
        UpsertOutcome::Updated(nap) => {
            let mut builder = HttpResponse::Ok();
            with_entity_alert(&mut builder, ENTITY, EntityAction::Updated, nap.id())
                .json(NapBody::from(nap))
        }
    })
}

/// Page over naps: every nap for admins, the caller's own otherwise.
#[utoipa::path(
    get,
    path = "/api/naps",
    params(PageQuery),
    responses(
        (status = 200, description = "Naps", body = [NapBody],
            headers(
                ("X-Total-Count" = u64, description = "Total number of naps"),
                ("Link" = String, description = "Pagination links")
            )),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "listNaps",
    security(("SessionCookie" = []))
)]
#[get("/naps")]
pub async fn list_naps(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .naps_query
        .list(ListNapsRequest {
            principal: session.principal()?,
            page: query.into_inner().into_request()?,
        })
        .await?;
    Ok(paged_response(page, NAPS_PATH, NapBody::from))
}

/// Page over the caller's own naps, whatever their role.
#[utoipa::path(
    get,
    path = "/api/naps/user",
    params(PageQuery),
    responses(
        (status = 200, description = "The caller's naps", body = [NapBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "listUserNaps",
    security(("SessionCookie" = []))
)]
#[get("/naps/user")]
pub async fn list_user_naps(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .naps_query
        .list_owned(ListNapsRequest {
            principal: session.principal()?,
            page: query.into_inner().into_request()?,
        })
        .await?;
    Ok(paged_response(page, USER_NAPS_PATH, NapBody::from))
}

/// Fetch one nap.
#[utoipa::path(
    get,
    path = "/api/naps/{id}",
    params(("id" = i64, Path, description = "Nap identifier")),
    responses(
        (status = 200, description = "Nap", body = NapBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Nap belongs to another user", body = ErrorSchema),
        (status = 404, description = "Nap not found", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "getNap",
    security(("SessionCookie" = []))
)]
#[get("/naps/{id}")]
pub async fn get_nap(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NapBody>> {
    let nap = state
        .naps_query
        .get(GetNapRequest {
            principal: session.principal()?,
            id: path_id(path.into_inner())?,
        })
        .await?;
    Ok(web::Json(NapBody::from(nap)))
}

/// Delete one nap.
#[utoipa::path(
    delete,
    path = "/api/naps/{id}",
    params(("id" = i64, Path, description = "Nap identifier")),
    responses(
        (status = 200, description = "Nap deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Nap belongs to another user", body = ErrorSchema),
        (status = 404, description = "Nap not found", body = ErrorSchema)
    ),
    tags = ["naps"],
    operation_id = "deleteNap",
    security(("SessionCookie" = []))
)]
#[delete("/naps/{id}")]
pub async fn delete_nap(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path.into_inner())?;
    state
        .naps
        .delete(DeleteNapRequest {
            principal: session.principal()?,
            id,
        })
        .await?;
    let mut builder = HttpResponse::Ok();
    Ok(with_entity_alert(&mut builder, ENTITY, EntityAction::Deleted, id).finish())
}

#[cfg(test)]
#[path = "naps_tests.rs"]
mod tests;
