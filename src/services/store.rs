//! Flat-file entry storage.
//!
//! Layout: one CSV file, fixed header, one row per entry, dates written
//! day-first (`DD/MM/YYYY`). Every write rewrites the whole file through a
//! sibling temp file that is renamed into place.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::entry::Entry;

pub const HEADERS: [&str; 9] = [
    "username",
    "date",
    "sleep_hours",
    "screen_time",
    "stress_level",
    "mood",
    "wellness_score",
    "tip",
    "journal",
];

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data file {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unrecognised date {value:?} in row {row}")]
    Date { value: String, row: usize },
}

/// On-disk shape of an entry. Field order is the column order.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    username: String,
    date: String,
    sleep_hours: f64,
    screen_time: f64,
    stress_level: i32,
    mood: String,
    wellness_score: u8,
    #[serde(default)]
    tip: String,
    #[serde(default)]
    journal: String,
}

impl From<&Entry> for Row {
    fn from(entry: &Entry) -> Self {
        Self {
            username: entry.username.clone(),
            date: entry.date.format(DATE_FORMAT).to_string(),
            sleep_hours: entry.sleep_hours,
            screen_time: entry.screen_time,
            stress_level: entry.stress_level,
            mood: entry.mood.clone(),
            wellness_score: entry.wellness_score,
            tip: entry.tip.clone(),
            journal: entry.journal.clone(),
        }
    }
}

impl Row {
    fn into_entry(self, row: usize) -> Result<Entry, StoreError> {
        let date = parse_date(&self.date).ok_or_else(|| StoreError::Date {
            value: self.date.clone(),
            row,
        })?;
        Ok(Entry {
            username: self.username,
            date,
            sleep_hours: self.sleep_hours,
            screen_time: self.screen_time,
            stress_level: self.stress_level,
            mood: self.mood,
            wellness_score: self.wellness_score,
            tip: self.tip,
            journal: self.journal,
        })
    }
}

/// Day-first is preferred; ISO dates (with or without a time of day) are
/// accepted and reduced to the calendar day.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Keep only the last row for each (username, date), preserving the storage
/// order of the survivors.
fn dedup_keep_last(entries: Vec<Entry>) -> Vec<Entry> {
    let keep: Vec<bool> = {
        let mut last_seen: HashMap<(&str, NaiveDate), usize> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            last_seen.insert((entry.username.as_str(), entry.date), index);
        }
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| last_seen[&(entry.username.as_str(), entry.date)] == index)
            .collect()
    };

    entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, keep)| keep.then_some(entry))
        .collect()
}

#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every entry, creating an empty store first if none exists.
    /// Later rows win over earlier rows for the same (username, date).
    pub fn load(&self) -> Result<Vec<Entry>, StoreError> {
        self.ensure_initialized()?;

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_error(e))?;
        let mut entries = Vec::new();
        for (index, record) in reader.deserialize::<Row>().enumerate() {
            let row = record.map_err(|e| self.csv_error(e))?;
            entries.push(row.into_entry(index + 1)?);
        }

        let total = entries.len();
        let entries = dedup_keep_last(entries);
        if entries.len() < total {
            tracing::debug!(
                path = ?self.path,
                dropped = total - entries.len(),
                "Dropped duplicate rows on load"
            );
        }
        Ok(entries)
    }

    /// Append `entry` unless one already exists for its (username, date).
    /// Returns `Ok(false)` without writing anything on a duplicate.
    pub fn save(&self, entry: &Entry) -> Result<bool, StoreError> {
        let mut entries = self.load()?;

        let exists = entries
            .iter()
            .any(|e| e.username == entry.username && e.date == entry.date);
        if exists {
            tracing::warn!(
                username = %entry.username,
                date = %entry.date,
                "Entry already exists, rejecting"
            );
            return Ok(false);
        }

        entries.push(entry.clone());
        self.write_all(&entries)?;

        tracing::info!(
            username = %entry.username,
            date = %entry.date,
            wellness_score = entry.wellness_score,
            "Entry saved"
        );
        Ok(true)
    }

    /// Replace the store with an empty one. Irreversible.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.write_all(&[])?;
        tracing::info!(path = ?self.path, "All entries cleared");
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if !self.exists() {
            self.write_all(&[])?;
            tracing::info!(path = ?self.path, "Initialized empty data file");
        }
        Ok(())
    }

    fn write_all(&self, entries: &[Entry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.temp_path();
        if let Err(e) = Self::write_file(&tmp, entries) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn write_file(path: &Path, entries: &[Entry]) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let csv_error = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(HEADERS).map_err(csv_error)?;
        for entry in entries {
            writer.serialize(Row::from(entry)).map_err(csv_error)?;
        }

        let file = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
        file.sync_all().map_err(io_error)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
