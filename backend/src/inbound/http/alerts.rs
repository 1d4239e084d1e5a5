//! Entity alert headers consumed by the web client's notification bar.

use actix_web::HttpResponseBuilder;

const APPLICATION: &str = "napchartApp";
pub const ALERT_HEADER: &str = "X-napchartApp-alert";
pub const PARAMS_HEADER: &str = "X-napchartApp-params";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Created,
    Updated,
    Deleted,
}

impl EntityAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// Attach `X-napchartApp-alert: napchartApp.<entity>.<action>` and the
/// entity id as `X-napchartApp-params`.
pub fn with_entity_alert<'a>(
    builder: &'a mut HttpResponseBuilder,
    entity: &str,
    action: EntityAction,
    id: impl ToString,
) -> &'a mut HttpResponseBuilder {
    builder
        .insert_header((
            ALERT_HEADER,
            format!("{APPLICATION}.{entity}.{}", action.as_str()),
        ))
        .insert_header((PARAMS_HEADER, id.to_string()))
}
