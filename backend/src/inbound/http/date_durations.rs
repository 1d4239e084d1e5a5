//! Daily sleep totals for the logged-in user.
//!
//! ```text
//! GET /api/date-durations/user?page=0&size=20
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DailyDurationSummary;
use crate::domain::ports::ListDateDurationsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{PageQuery, paged_response};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const DATE_DURATIONS_PATH: &str = "/api/date-durations";

/// One day's total nap time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateDurationBody {
    #[schema(example = "user:2024-05-01")]
    pub id: String,
    #[schema(format = "date", example = "2024-05-01")]
    pub local_date: String,
    /// Hours napped that day.
    #[schema(example = 2.5)]
    pub total_duration: f64,
    #[schema(example = "user")]
    pub login: String,
}

impl From<DailyDurationSummary> for DateDurationBody {
    fn from(value: DailyDurationSummary) -> Self {
        Self {
            id: value.id().to_owned(),
            local_date: value.date().format("%Y-%m-%d").to_string(),
            total_duration: value.total_duration(),
            login: value.login().to_string(),
        }
    }
}

/// Page over the caller's daily totals.
#[utoipa::path(
    get,
    path = "/api/date-durations/user",
    params(PageQuery),
    responses(
        (status = 200, description = "Daily totals", body = [DateDurationBody],
            headers(
                ("X-Total-Count" = u64, description = "Total number of days"),
                ("Link" = String, description = "Pagination links")
            )),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["durations"],
    operation_id = "listUserDateDurations",
    security(("SessionCookie" = []))
)]
#[get("/date-durations/user")]
pub async fn list_user_date_durations(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .date_durations
        .list_for_current_user(ListDateDurationsRequest {
            principal: session.principal()?,
            page: query.into_inner().into_request()?,
        })
        .await?;
    Ok(paged_response(page, DATE_DURATIONS_PATH, DateDurationBody::from))
}
