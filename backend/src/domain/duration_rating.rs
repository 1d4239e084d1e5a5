//! Average rating per nap length, as plotted on the dashboard.

/// Mean rating of every nap whose duration rounds to `duration` hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRating {
    duration: i32,
    average_rating: f64,
}

impl DurationRating {
    pub fn new(duration: i32, average_rating: f64) -> Self {
        Self {
            duration,
            average_rating,
        }
    }

    /// Rounded duration in hours.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }
}
