use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MedalTier {
    Gold,
    Silver,
    Bronze,
    None,
}

impl MedalTier {
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => MedalTier::Gold,
            2 => MedalTier::Silver,
            3 => MedalTier::Bronze,
            _ => MedalTier::None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaderboardRow {
    pub username: String,
    pub mean_score: f64,
    pub rank: u32,
    pub medal: MedalTier,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub period: Period,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub period: Period,
    pub reference_date: NaiveDate,
    pub rows: Vec<LeaderboardRow>,
}
