use serde::Serialize;

use crate::calendar::HolidayCalendar;
use crate::model::Milestones;

/// Business days spent in QC: from QC start through the executive review,
/// or through ship when no review is scheduled.
///
/// `None` when QC start is missing or neither end milestone is dated.
pub fn qc_duration(milestones: &Milestones, calendar: &HolidayCalendar) -> Option<u32> {
    let start = milestones.qc_start?;
    let end = milestones.executive_review.or(milestones.ship)?;
    Some(calendar.working_days(start, end))
}

/// Business days from the start of NTC testing through QC start.
pub fn ntc_duration(milestones: &Milestones, calendar: &HolidayCalendar) -> Option<u32> {
    let start = milestones.ntc_testing?;
    let end = milestones.qc_start?;
    Some(calendar.working_days(start, end))
}

/// Display severity for a duration figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBand {
    Good,
    Warning,
    Critical,
}

impl DurationBand {
    /// Shorter is better: up to 3 days good, up to 7 a warning, beyond that critical.
    pub fn standard(days: u32) -> Self {
        match days {
            0..=3 => DurationBand::Good,
            4..=7 => DurationBand::Warning,
            _ => DurationBand::Critical,
        }
    }

    /// QC wants enough time: under 2 days critical, under 4 a warning.
    pub fn qc(days: u32) -> Self {
        match days {
            0..=1 => DurationBand::Critical,
            2..=3 => DurationBand::Warning,
            _ => DurationBand::Good,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationBand::Good => "good",
            DurationBand::Warning => "warning",
            DurationBand::Critical => "critical",
        }
    }
}

/// Render an optional duration the way boards show it.
pub fn format_days(days: Option<u32>) -> String {
    days.map_or_else(|| "–".to_string(), |d| d.to_string())
}
