//! Per-day sleep totals derived from naps.

use std::fmt;

use chrono::NaiveDate;

use super::Login;

/// Validation errors for [`DailyDurationSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DailyDurationError {
    /// Totals are sums of hours and cannot be negative or non-finite.
    InvalidTotal(f64),
    /// The identifier was blank.
    EmptyId,
}

impl fmt::Display for DailyDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTotal(value) => {
                write!(f, "total duration must be finite and non-negative, got {value}")
            }
            Self::EmptyId => write!(f, "duration summary id must not be empty"),
        }
    }
}

impl std::error::Error for DailyDurationError {}

/// One login's total sleep on one calendar day.
///
/// There is at most one summary per `(login, date)`; the aggregate view
/// keys rows as `login:YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDurationSummary {
    id: String,
    date: NaiveDate,
    total_duration: f64,
    login: Login,
}

impl DailyDurationSummary {
    /// Validate and build a summary.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        total_duration: f64,
        login: Login,
    ) -> Result<Self, DailyDurationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DailyDurationError::EmptyId);
        }
        if !total_duration.is_finite() || total_duration < 0.0 {
            return Err(DailyDurationError::InvalidTotal(total_duration));
        }
        Ok(Self {
            id,
            date,
            total_duration,
            login,
        })
    }

    /// Canonical identifier for a `(login, date)` pair.
    pub fn key_for(login: &Login, date: NaiveDate) -> String {
        format!("{login}:{}", date.format("%Y-%m-%d"))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Total hours slept.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn login(&self) -> &Login {
        &self.login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn login() -> Login {
        Login::new("alice").expect("valid login")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[rstest]
    fn key_combines_login_and_iso_date() {
        assert_eq!(DailyDurationSummary::key_for(&login(), date()), "alice:2024-03-09");
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_totals(#[case] total: f64) {
        let result = DailyDurationSummary::new("alice:2024-03-09", date(), total, login());
        assert!(matches!(result, Err(DailyDurationError::InvalidTotal(_))));
    }

    #[rstest]
    fn accepts_zero_total() {
        let summary =
            DailyDurationSummary::new("alice:2024-03-09", date(), 0.0, login()).expect("valid");
        assert_eq!(summary.total_duration(), 0.0);
        assert_eq!(summary.login().as_ref(), "alice");
    }
}
