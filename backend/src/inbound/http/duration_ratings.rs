//! Average rating per nap length, for the rating chart.
//!
//! ```text
//! GET /api/duration-ratings?page=0&size=20
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DurationRating;
use crate::domain::ports::ListDurationRatingsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::{PageQuery, paged_response};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const DURATION_RATINGS_PATH: &str = "/api/duration-ratings";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DurationRatingBody {
    /// Nap length rounded to whole hours.
    #[schema(example = 2)]
    pub duration: i32,
    #[schema(example = 3.5)]
    pub average_rating: f64,
}

impl From<DurationRating> for DurationRatingBody {
    fn from(value: DurationRating) -> Self {
        Self {
            duration: value.duration(),
            average_rating: value.average_rating(),
        }
    }
}

/// Page over average ratings by nap length.
#[utoipa::path(
    get,
    path = "/api/duration-ratings",
    params(PageQuery),
    responses(
        (status = 200, description = "Average ratings", body = [DurationRatingBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["durations"],
    operation_id = "listDurationRatings",
    security(("SessionCookie" = []))
)]
#[get("/duration-ratings")]
pub async fn list_duration_ratings(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .duration_ratings
        .list(ListDurationRatingsRequest {
            principal: session.principal()?,
            page: query.into_inner().into_request()?,
        })
        .await?;
    Ok(paged_response(page, DURATION_RATINGS_PATH, DurationRatingBody::from))
}
