//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types are fallible
//! because a row written outside this service may break domain invariants;
//! the error is a message that adapters wrap in their query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{
    DailyDurationSummary, DurationRating, Login, Nap, NapDetails, NapId, ResolvedNap, User,
};

use super::schema::{date_durations, duration_ratings, naps, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub login: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let login = Login::new(&row.login).map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(Self::new(row.id, login))
    }
}

/// Row struct for reading from the naps table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = naps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NapRow {
    pub id: i64,
    pub owner_login: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub rating: Option<i32>,
}

impl TryFrom<NapRow> for Nap {
    type Error = String;

    fn try_from(row: NapRow) -> Result<Self, Self::Error> {
        let id = NapId::new(row.id).map_err(|err| format!("nap id {}: {err}", row.id))?;
        let owner =
            Login::new(&row.owner_login).map_err(|err| format!("nap {} owner: {err}", row.id))?;
        Ok(Self::new(
            id,
            owner,
            NapDetails {
                start: row.start_at,
                end: row.end_at,
                duration: row.duration,
                rating: row.rating,
            },
        ))
    }
}

/// Insertable struct for new naps; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = naps)]
pub(crate) struct NewNapRow<'a> {
    pub owner_login: &'a str,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub rating: Option<i32>,
}

impl<'a> From<&'a ResolvedNap> for NewNapRow<'a> {
    fn from(nap: &'a ResolvedNap) -> Self {
        let details = nap.details();
        Self {
            owner_login: nap.owner().as_ref(),
            start_at: details.start,
            end_at: details.end,
            duration: details.duration,
            rating: details.rating,
        }
    }
}

/// Full-replacement changeset: absent attributes clear the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = naps)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NapUpdate<'a> {
    pub owner_login: &'a str,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub rating: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NapUpdate<'a> {
    pub(crate) fn new(nap: &'a ResolvedNap, updated_at: DateTime<Utc>) -> Self {
        let NewNapRow {
            owner_login,
            start_at,
            end_at,
            duration,
            rating,
        } = NewNapRow::from(nap);
        Self {
            owner_login,
            start_at,
            end_at,
            duration,
            rating,
            updated_at,
        }
    }
}

/// Row struct for the `date_durations` view.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = date_durations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DateDurationRow {
    pub id: String,
    pub local_date: NaiveDate,
    pub total_duration: f64,
    pub login: String,
}

impl TryFrom<DateDurationRow> for DailyDurationSummary {
    type Error = String;

    fn try_from(row: DateDurationRow) -> Result<Self, Self::Error> {
        let login = Login::new(&row.login).map_err(|err| format!("summary {}: {err}", row.id))?;
        let id = row.id;
        Self::new(id.clone(), row.local_date, row.total_duration, login)
            .map_err(|err| format!("summary {id}: {err}"))
    }
}

/// Row struct for the `duration_ratings` view.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = duration_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DurationRatingRow {
    pub duration: i32,
    pub average_rating: f64,
}

impl From<DurationRatingRow> for DurationRating {
    fn from(row: DurationRatingRow) -> Self {
        Self::new(row.duration, row.average_rating)
    }
}
