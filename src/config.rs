//! Engine settings: default timeline horizon and the holiday table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::HolidayCalendar;
use crate::error::ImportError;
use crate::model::timeline::{DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS};

/// Persisted settings (lives in the OS config directory by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSettings")]
pub struct EngineSettings {
    /// Window length used when a project has no ship date, 1..=`MAX_HORIZON_DAYS`.
    pub default_horizon_days: i64,
    pub holidays: HolidayCalendar,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_horizon_days: DEFAULT_HORIZON_DAYS,
            holidays: HolidayCalendar::weekends_only(),
        }
    }
}

/// Settings as read from disk, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSettings {
    default_horizon_days: i64,
    holidays: HolidayCalendar,
}

impl Default for RawSettings {
    fn default() -> Self {
        let defaults = EngineSettings::default();
        Self {
            default_horizon_days: defaults.default_horizon_days,
            holidays: defaults.holidays,
        }
    }
}

impl TryFrom<RawSettings> for EngineSettings {
    type Error = ImportError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        if !(1..=MAX_HORIZON_DAYS).contains(&raw.default_horizon_days) {
            return Err(ImportError::InvalidHorizon {
                days: raw.default_horizon_days,
                max: MAX_HORIZON_DAYS,
            });
        }
        Ok(Self {
            default_horizon_days: raw.default_horizon_days,
            holidays: raw.holidays,
        })
    }
}

impl EngineSettings {
    /// Platform settings path, or `./settings.json` when no home directory is known.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "FabLifecycle")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let json = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json)?;
        debug!(
            path = %path.display(),
            holidays = settings.holidays.len(),
            horizon = settings.default_horizon_days,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Load from `path` if it exists; a missing file yields defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ImportError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Settings from the platform config directory, falling back to defaults
    /// (with a warning) when the file cannot be read.
    pub fn discover() -> Self {
        let path = Self::default_path();
        Self::load_or_default(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "ignoring unreadable settings");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ImportError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ImportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ImportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_are_weekends_only_with_thirty_day_horizon() {
        let s = EngineSettings::default();
        assert_eq!(s.default_horizon_days, 30);
        assert!(s.holidays.is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let s: EngineSettings =
            serde_json::from_str(r#"{"holidays":{"2025":["2025-12-25"]}}"#).unwrap();
        assert_eq!(s.default_horizon_days, 30);
        assert!(s
            .holidays
            .is_holiday(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = EngineSettings::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(s, EngineSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut s = EngineSettings::default();
        s.default_horizon_days = 45;
        s.holidays
            .insert(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        s.save(&path).unwrap();
        assert_eq!(EngineSettings::load(&path).unwrap(), s);
    }

    #[test]
    fn rejects_non_positive_horizon() {
        for days in [0, -10] {
            let json = format!(r#"{{"defaultHorizonDays": {days}}}"#);
            let err = serde_json::from_str::<EngineSettings>(&json).unwrap_err();
            assert!(err.to_string().contains("horizon"), "{err}");
        }
    }

    #[test]
    fn rejects_oversized_horizon_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"defaultHorizonDays": 1000000000}"#).unwrap();
        assert!(EngineSettings::load(&path).is_err());

        std::fs::write(&path, format!(r#"{{"defaultHorizonDays": {MAX_HORIZON_DAYS}}}"#)).unwrap();
        let s = EngineSettings::load(&path).unwrap();
        assert_eq!(s.default_horizon_days, MAX_HORIZON_DAYS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"holidays":{"2025":["2024-12-25"]}}"#).unwrap();
        assert!(EngineSettings::load_or_default(&path).is_err());
    }
}
