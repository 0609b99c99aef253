use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One user's check-in for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub username: String,
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub screen_time: f64,
    pub stress_level: i32,
    pub mood: String,
    pub wellness_score: u8,
    pub tip: String,
    pub journal: String,
}

/// Moods offered at check-in time. Storage keeps the display text, so rows
/// written by other tools may carry moods outside this list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Tired,
    Sad,
    Anxious,
    Stressed,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Tired => "Tired",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Stressed => "Stressed",
        }
    }
}

/// Targets shown next to the day's snapshot.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DailyGoals {
    pub sleep_hours: f64,
    pub max_screen_time: f64,
    pub max_stress_level: i32,
}

pub const DAILY_GOALS: DailyGoals = DailyGoals {
    sleep_hours: 8.0,
    max_screen_time: 3.0,
    max_stress_level: 4,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 30, message = "Username must be 1-30 characters"))]
    pub username: String,

    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 12.0, message = "Sleep hours must be between 0 and 12"))]
    pub sleep_hours: f64,

    #[validate(range(min = 0.0, max = 24.0, message = "Screen time must be between 0 and 24"))]
    pub screen_time: f64,

    #[validate(range(min = 0, max = 10, message = "Stress level must be between 0 and 10"))]
    pub stress_level: i32,

    pub mood: Mood,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Journal too long"))]
    pub journal: String,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub username: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub entry: Entry,
    pub goals: DailyGoals,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// All users when omitted.
    pub username: Option<String>,
    pub days: Option<u32>,
    /// Last day of the window; defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
}
