use chrono::NaiveDate;
use serde::Serialize;

/// Cached consecutive-day journaling count for one user. Stored in the
/// `users` collection with the date as a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakState {
    pub last_entry_date: NaiveDate,
    pub streak_count: u32,
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl StreakState {
    pub fn new(last_entry_date: NaiveDate, streak_count: u32) -> Self {
        Self {
            last_entry_date,
            streak_count: streak_count.max(1),
        }
    }

    pub fn date_string(&self) -> String {
        self.last_entry_date.format(DATE_FORMAT).to_string()
    }

    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
    }
}
