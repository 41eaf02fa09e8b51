use std::path::Path;

use tracing::warn;

use super::csv_import::{normalize_header, parse_date, read_source, reader_for};
use crate::calendar::HolidayCalendar;
use crate::error::ImportError;

/// Import a holiday list from CSV.
///
/// Needs a `date` (or `holiday`) column; any other columns, such as a
/// holiday name, are ignored. Returns the calendar and the number of rows
/// skipped because the row or its date could not be read.
pub fn import_holidays_csv(path: &Path) -> Result<(HolidayCalendar, usize), ImportError> {
    let content = read_source(path)?;
    import_holidays_from_bytes(&content)
}

pub fn import_holidays_from_str(content: &str) -> Result<(HolidayCalendar, usize), ImportError> {
    import_holidays_from_bytes(content.as_bytes())
}

/// Same as [`import_holidays_from_str`] for raw file contents, which may
/// contain rows that are not valid UTF-8.
pub fn import_holidays_from_bytes(content: &[u8]) -> Result<(HolidayCalendar, usize), ImportError> {
    let mut reader = reader_for(content);
    let headers = reader.headers()?.clone();

    let date_col = headers
        .iter()
        .position(|h| matches!(normalize_header(h).as_str(), "date" | "holiday" | "holidaydate" | "day"))
        .ok_or_else(|| ImportError::MissingColumns {
            required: "date",
            found: headers.iter().map(str::to_string).collect(),
        })?;

    let mut calendar = HolidayCalendar::default();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable holiday row");
                skipped += 1;
                continue;
            }
        };
        match record.get(date_col).and_then(parse_date) {
            Some(d) => calendar.insert(d),
            None => {
                warn!(row, value = record.get(date_col).unwrap_or(""), "skipping holiday row");
                skipped += 1;
            }
        }
    }

    if calendar.is_empty() && skipped > 0 {
        return Err(ImportError::NoValidRows { skipped });
    }
    Ok((calendar, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn imports_named_holidays_across_years() {
        let csv = "Name;Date\nNew Year;2025-01-01\nChristmas;25/12/2025\nNew Year;2026-01-01\nBroken;tbd\n";
        let (cal, skipped) = import_holidays_from_str(csv).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(cal.len(), 3);
        assert_eq!(cal.years().collect::<Vec<_>>(), vec![2025, 2026]);
        assert!(cal.is_holiday(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
    }

    #[test]
    fn unreadable_row_is_skipped_not_fatal() {
        let (cal, skipped) =
            import_holidays_from_bytes(b"date\n2025-01-01\n\xff\xfe\n2025-12-25\n").unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(cal.len(), 2);
        assert!(cal.is_holiday(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
    }

    #[test]
    fn unreadable_file_rows_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holidays.csv");
        std::fs::write(&path, b"Name;Date\nNew Year;2026-01-01\n\xc3\x28;2026-05-01\n").unwrap();
        let (cal, skipped) = import_holidays_csv(&path).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn header_only_file_is_an_empty_calendar() {
        let (cal, skipped) = import_holidays_from_str("date\n").unwrap();
        assert!(cal.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn missing_date_column() {
        let err = import_holidays_from_str("name\nNew Year\n").unwrap_err();
        assert!(matches!(err, ImportError::MissingColumns { .. }));
    }
}
