//! Business-day calendar: weekends plus a per-year holiday table.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Holidays grouped by calendar year.
///
/// Serialized as `{"2025": ["2025-01-01", ...], ...}` so future years can be
/// added to the settings file without touching code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<i32, BTreeSet<NaiveDate>>", into = "BTreeMap<i32, BTreeSet<NaiveDate>>")]
pub struct HolidayCalendar {
    years: BTreeMap<i32, BTreeSet<NaiveDate>>,
}

impl HolidayCalendar {
    /// A calendar that only excludes weekends.
    pub fn weekends_only() -> Self {
        Self::default()
    }

    /// Build a calendar from loose dates, filing each under its own year.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut calendar = Self::default();
        for date in dates {
            calendar.insert(date);
        }
        calendar
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.years.entry(date.year()).or_default().insert(date);
    }

    /// Merge another calendar's holidays into this one.
    pub fn extend(&mut self, other: &HolidayCalendar) {
        for date in other.iter() {
            self.insert(date);
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.years
            .get(&date.year())
            .is_some_and(|days| days.contains(&date))
    }

    /// Monday to Friday and not a configured holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// Count business days from `start` to `end`, both inclusive.
    ///
    /// An inverted range counts as zero.
    pub fn working_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if end < start {
            return 0;
        }
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .count() as u32
    }

    /// Years with at least one holiday configured.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Every holiday in date order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.years.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.years.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<BTreeMap<i32, BTreeSet<NaiveDate>>> for HolidayCalendar {
    type Error = ImportError;

    fn try_from(years: BTreeMap<i32, BTreeSet<NaiveDate>>) -> Result<Self, Self::Error> {
        for (year, days) in &years {
            if let Some(stray) = days.iter().find(|d| d.year() != *year) {
                return Err(ImportError::HolidayYearMismatch {
                    year: *year,
                    date: *stray,
                });
            }
        }
        let years = years.into_iter().filter(|(_, d)| !d.is_empty()).collect();
        Ok(Self { years })
    }
}

impl From<HolidayCalendar> for BTreeMap<i32, BTreeSet<NaiveDate>> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.years
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekends_are_not_business_days() {
        let cal = HolidayCalendar::weekends_only();
        assert!(cal.is_business_day(date(2025, 3, 7))); // Friday
        assert!(!cal.is_business_day(date(2025, 3, 8)));
        assert!(!cal.is_business_day(date(2025, 3, 9)));
        assert!(cal.is_business_day(date(2025, 3, 10)));
    }

    #[test]
    fn holidays_are_excluded() {
        let cal = HolidayCalendar::from_dates([date(2025, 1, 1), date(2025, 12, 25)]);
        assert!(!cal.is_business_day(date(2025, 1, 1)));
        assert!(cal.is_business_day(date(2025, 1, 2)));
        assert_eq!(cal.len(), 2);
        assert_eq!(cal.years().collect::<Vec<_>>(), vec![2025]);
    }

    #[test]
    fn working_days_inclusive() {
        let cal = HolidayCalendar::weekends_only();
        assert_eq!(cal.working_days(date(2025, 3, 3), date(2025, 3, 7)), 5);
        assert_eq!(cal.working_days(date(2025, 3, 3), date(2025, 3, 9)), 5);
        assert_eq!(cal.working_days(date(2025, 3, 3), date(2025, 3, 3)), 1);
        assert_eq!(cal.working_days(date(2025, 3, 8), date(2025, 3, 8)), 0);
    }

    #[test]
    fn inverted_range_is_zero() {
        let cal = HolidayCalendar::weekends_only();
        assert_eq!(cal.working_days(date(2025, 3, 7), date(2025, 3, 3)), 0);
    }

    #[test]
    fn holiday_inside_range_reduces_count() {
        let cal = HolidayCalendar::from_dates([date(2025, 3, 5)]);
        assert_eq!(cal.working_days(date(2025, 3, 3), date(2025, 3, 7)), 4);
    }

    #[test]
    fn deserializes_year_keyed_table() {
        let cal: HolidayCalendar =
            serde_json::from_str(r#"{"2025":["2025-01-01","2025-07-04"],"2026":["2026-01-01"]}"#)
                .unwrap();
        assert_eq!(cal.len(), 3);
        assert!(cal.is_holiday(date(2026, 1, 1)));
        assert_eq!(cal.iter().filter(|d| d.year() == 2025).count(), 2);
    }

    #[test]
    fn rejects_date_filed_under_wrong_year() {
        let err = serde_json::from_str::<HolidayCalendar>(r#"{"2025":["2026-01-01"]}"#);
        assert!(err.is_err());
    }
}
