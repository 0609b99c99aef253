//! Read-side views over loaded entries: trailing windows, leaderboards,
//! per-user history and single-day lookup. Nothing here touches storage.

use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate};

use crate::models::entry::Entry;
use crate::models::leaderboard::{LeaderboardRow, MedalTier, Period};

/// Days covered by the weekly leaderboard, reference date included.
const WEEK_DAYS: u64 = 7;

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

fn belongs_to(entry: &Entry, username: Option<&str>) -> bool {
    username.map_or(true, |name| entry.username == name)
}

/// Trailing `n`-day window ending today. See [`last_n_days_from`].
pub fn last_n_days(entries: &[Entry], n: u32, username: Option<&str>) -> Vec<Entry> {
    last_n_days_from(entries, n, username, today())
}

/// Entries dated within `[today - (n-1), today]`, oldest first, at most `n`
/// of them. `username: None` spans all users. Missing days are not padded.
pub fn last_n_days_from(
    entries: &[Entry],
    n: u32,
    username: Option<&str>,
    today: NaiveDate,
) -> Vec<Entry> {
    if n == 0 {
        return Vec::new();
    }
    let start = days_before(today, u64::from(n) - 1);

    let mut window: Vec<Entry> = entries
        .iter()
        .filter(|e| belongs_to(e, username))
        .filter(|e| e.date >= start && e.date <= today)
        .cloned()
        .collect();
    window.sort_by_key(|e| e.date);

    let excess = window.len().saturating_sub(n as usize);
    window.drain(..excess);
    window
}

/// Users ranked by mean wellness score over the period ending at
/// `reference_date`. Equal means keep username order.
pub fn leaderboard(
    entries: &[Entry],
    period: Period,
    reference_date: NaiveDate,
) -> Vec<LeaderboardRow> {
    let start = match period {
        Period::Daily => reference_date,
        Period::Weekly => days_before(reference_date, WEEK_DAYS - 1),
    };

    let mut totals: BTreeMap<&str, (u64, u32)> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.date >= start && e.date <= reference_date)
    {
        let (sum, count) = totals.entry(entry.username.as_str()).or_default();
        *sum += u64::from(entry.wellness_score);
        *count += 1;
    }

    let mut means: Vec<(&str, f64)> = totals
        .into_iter()
        .map(|(username, (sum, count))| (username, sum as f64 / f64::from(count)))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));

    means
        .into_iter()
        .zip(1u32..)
        .map(|((username, mean_score), rank)| LeaderboardRow {
            username: username.to_string(),
            mean_score,
            rank,
            medal: MedalTier::for_rank(rank),
        })
        .collect()
}

/// All of a user's entries, newest first.
pub fn history(entries: &[Entry], username: &str) -> Vec<Entry> {
    let mut rows: Vec<Entry> = entries
        .iter()
        .filter(|e| e.username == username)
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

pub fn entry_on(entries: &[Entry], username: &str, date: NaiveDate) -> Option<Entry> {
    entries
        .iter()
        .rev()
        .find(|e| e.username == username && e.date == date)
        .cloned()
}
