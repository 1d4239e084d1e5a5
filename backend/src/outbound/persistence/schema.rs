//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations`. `date_durations` and
//! `duration_ratings` are views; Diesel needs a key column for them, so the
//! declared primary keys are the view's natural keys.

diesel::table! {
    /// Accounts that may own naps.
    users (id) {
        id -> Int8,
        /// Unique lowercase login.
        login -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recorded naps.
    naps (id) {
        id -> Int8,
        /// References `users.login`.
        owner_login -> Varchar,
        start_at -> Nullable<Timestamptz>,
        end_at -> Nullable<Timestamptz>,
        /// Hours slept.
        duration -> Nullable<Float8>,
        rating -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-login daily totals (read-only view).
    date_durations (id) {
        /// `login:YYYY-MM-DD`.
        id -> Text,
        local_date -> Date,
        total_duration -> Float8,
        login -> Varchar,
    }
}

diesel::table! {
    /// Average rating per rounded duration (read-only view).
    duration_ratings (duration) {
        duration -> Int4,
        average_rating -> Float8,
    }
}
