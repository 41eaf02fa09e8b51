use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// A rejected manual phase change. The project is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot mark project completed before it ships (ship: {}, today: {today})", ship.map_or_else(|| "not scheduled".to_string(), |d| d.to_string()))]
    CompletionBeforeShip {
        ship: Option<NaiveDate>,
        today: NaiveDate,
    },
}

/// Failures while reading or writing project data and settings.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns (need {required}); found headers: {found:?}")]
    MissingColumns {
        required: &'static str,
        found: Vec<String>,
    },

    #[error("no valid rows found ({skipped} rows skipped)")]
    NoValidRows { skipped: usize },

    #[error("file is empty or has no data rows")]
    Empty,

    #[error("default horizon of {days} days is out of range (1..={max})")]
    InvalidHorizon { days: i64, max: i64 },

    #[error("holiday {date} is filed under year {year}")]
    HolidayYearMismatch { year: i32, date: NaiveDate },
}
