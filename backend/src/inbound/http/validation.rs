//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` error whose details name the
//! offending field and a stable code, so clients can highlight the input.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Error, Login, NapId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidTimestamp,
    InvalidNapId,
    InvalidLogin,
    InvalidPageSize,
    InvalidDuration,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidNapId => "invalid_nap_id",
            ErrorCode::InvalidLogin => "invalid_login",
            ErrorCode::InvalidPageSize => "invalid_page_size",
            ErrorCode::InvalidDuration => "invalid_duration",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            ValidationError::new(field, format!("{} must be an RFC 3339 timestamp", field.as_str()))
                .with_value(ErrorCode::InvalidTimestamp, value.as_str())
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

pub(crate) fn parse_nap_id(value: i64, field: FieldName) -> Result<NapId, Error> {
    NapId::new(value).map_err(|err| {
        ValidationError::new(field, format!("{}: {err}", field.as_str()))
            .with_value(ErrorCode::InvalidNapId, value.to_string())
    })
}

pub(crate) fn parse_optional_login(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Login>, Error> {
    value
        .map(|raw| {
            Login::new(&raw).map_err(|err| {
                ValidationError::new(field, format!("{}: {err}", field.as_str()))
                    .with_value(ErrorCode::InvalidLogin, raw.as_str())
            })
        })
        .transpose()
}

/// Largest accepted nap length in hours (`i32::MAX`); rounded durations must fit an `i32`.
const MAX_DURATION_HOURS: f64 = 2_147_483_647.0;

pub(crate) fn parse_optional_duration(
    value: Option<f64>,
    field: FieldName,
) -> Result<Option<f64>, Error> {
    match value {
        Some(hours) if !hours.is_finite() || !(0.0..=MAX_DURATION_HOURS).contains(&hours) => Err(
            ValidationError::new(
                field,
                format!("{} must be between 0 and {MAX_DURATION_HOURS} hours", field.as_str()),
            )
            .with_value(ErrorCode::InvalidDuration, hours.to_string()),
        ),
        other => Ok(other),
    }
}

pub(crate) fn invalid_page_size_error(
    field: FieldName,
    value: u32,
    reason: impl std::fmt::Display,
) -> Error {
    ValidationError::new(field, reason.to_string())
        .with_value(ErrorCode::InvalidPageSize, value.to_string())
}
