use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::milestone::{Milestone, Milestones};

/// Days added to the window start when a project has no ship date yet.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// Largest horizon accepted from settings (ten years).
pub const MAX_HORIZON_DAYS: i64 = 3650;

/// `start` plus the horizon, with the horizon clamped to 0..=`MAX_HORIZON_DAYS`.
///
/// Saturates at the last representable date instead of overflowing.
fn horizon_end(start: NaiveDate, horizon_days: i64) -> NaiveDate {
    let days = horizon_days.clamp(0, MAX_HORIZON_DAYS);
    start
        .checked_add_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Map `date` onto 0..=100 within `[window_start, window_end]`.
///
/// Dates outside the window clamp to the nearest edge. A window with no
/// positive length (end on or before start) puts every date at 0.
pub fn project_position(date: NaiveDate, window_start: NaiveDate, window_end: NaiveDate) -> f64 {
    let span = (window_end - window_start).num_days();
    if span <= 0 {
        return 0.0;
    }
    let offset = (date - window_start).num_days() as f64;
    (100.0 * offset / span as f64).clamp(0.0, 100.0)
}

/// How far `today` sits through the window, as a 0..=100 percentage.
pub fn elapsed_progress(today: NaiveDate, window_start: NaiveDate, window_end: NaiveDate) -> f64 {
    project_position(today, window_start, window_end)
}

/// The date range used to normalize a project's milestones for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window anchored on a real start milestone (fabrication, then assembly).
    ///
    /// Returns `None` when neither start milestone is dated.
    pub fn anchored(milestones: &Milestones, horizon_days: i64) -> Option<Self> {
        let start = milestones
            .fabrication_start
            .or(milestones.assembly_start)?;
        Some(Self::ending_at_ship(start, milestones, horizon_days))
    }

    /// Window for the progress bar, falling back to `today` as the start.
    pub fn for_progress(milestones: &Milestones, today: NaiveDate, horizon_days: i64) -> Self {
        Self::anchored(milestones, horizon_days)
            .unwrap_or_else(|| Self::ending_at_ship(today, milestones, horizon_days))
    }

    fn ending_at_ship(start: NaiveDate, milestones: &Milestones, horizon_days: i64) -> Self {
        let end = milestones
            .ship
            .unwrap_or_else(|| horizon_end(start, horizon_days));
        Self { start, end }
    }

    /// Length of the window in days (negative when the dates are inverted).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Position of a date within the window, 0..=100.
    pub fn position(&self, date: NaiveDate) -> f64 {
        project_position(date, self.start, self.end)
    }

    pub fn elapsed(&self, today: NaiveDate) -> f64 {
        elapsed_progress(today, self.start, self.end)
    }
}

/// A milestone placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneMarker {
    pub milestone: Milestone,
    pub date: NaiveDate,
    /// 0..=100 along the window.
    pub position: f64,
    /// The date is on or before today.
    pub reached: bool,
}

/// Place a marker for each dated timeline milestone.
///
/// Markers need an anchored window; a project with neither fabrication nor
/// assembly dated gets no markers.
pub fn milestone_markers(
    milestones: &Milestones,
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<MilestoneMarker> {
    let Some(window) = TimelineWindow::anchored(milestones, horizon_days) else {
        return Vec::new();
    };

    Milestone::TIMELINE
        .iter()
        .filter_map(|m| {
            milestones.get(*m).map(|date| MilestoneMarker {
                milestone: *m,
                date,
                position: window.position(date),
                reached: date <= today,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn edges_map_to_zero_and_hundred() {
        let (s, e) = (date(2025, 1, 1), date(2025, 6, 1));
        assert_eq!(project_position(s, s, e), 0.0);
        assert_eq!(project_position(e, s, e), 100.0);
        assert_eq!(project_position(date(2024, 12, 1), s, e), 0.0);
        assert_eq!(project_position(date(2025, 12, 1), s, e), 100.0);
    }

    #[test]
    fn degenerate_window_is_zero() {
        let d = date(2025, 1, 1);
        assert_eq!(project_position(date(2025, 2, 1), d, d), 0.0);
        assert_eq!(project_position(date(2025, 2, 1), d, date(2024, 1, 1)), 0.0);
    }

    #[test]
    fn window_prefers_fabrication_then_assembly() {
        let ms = Milestones::default()
            .with(Milestone::AssemblyStart, date(2025, 2, 1))
            .with(Milestone::Ship, date(2025, 6, 1));
        let w = TimelineWindow::anchored(&ms, DEFAULT_HORIZON_DAYS).unwrap();
        assert_eq!(w.start, date(2025, 2, 1));

        let ms = ms.with(Milestone::FabricationStart, date(2025, 1, 1));
        let w = TimelineWindow::anchored(&ms, DEFAULT_HORIZON_DAYS).unwrap();
        assert_eq!(w.start, date(2025, 1, 1));
        assert_eq!(w.end, date(2025, 6, 1));
    }

    #[test]
    fn missing_ship_uses_horizon() {
        let ms = Milestones::default().with(Milestone::FabricationStart, date(2025, 1, 1));
        let w = TimelineWindow::anchored(&ms, DEFAULT_HORIZON_DAYS).unwrap();
        assert_eq!(w.end, date(2025, 1, 31));
        assert_eq!(w.span_days(), 30);
    }

    #[test]
    fn out_of_range_horizon_never_overflows() {
        let ms = Milestones::default().with(Milestone::FabricationStart, date(2025, 1, 1));

        let w = TimelineWindow::anchored(&ms, 1_000_000_000).unwrap();
        assert_eq!(w.span_days(), MAX_HORIZON_DAYS);

        let w = TimelineWindow::anchored(&ms, -10).unwrap();
        assert_eq!(w.end, w.start);

        let w = TimelineWindow::for_progress(&Milestones::default(), NaiveDate::MAX, 30);
        assert_eq!(w.end, NaiveDate::MAX);
        assert_eq!(w.elapsed(NaiveDate::MAX), 0.0);
        assert!(milestone_markers(&ms, date(2025, 2, 1), i64::MAX).len() == 1);
    }

    #[test]
    fn progress_window_falls_back_to_today() {
        let today = date(2025, 3, 10);
        let w = TimelineWindow::for_progress(&Milestones::default(), today, DEFAULT_HORIZON_DAYS);
        assert_eq!(w.start, today);
        assert_eq!(w.elapsed(today), 0.0);
        assert!(TimelineWindow::anchored(&Milestones::default(), DEFAULT_HORIZON_DAYS).is_none());
    }

    #[test]
    fn markers_skip_absent_and_flag_reached() {
        let ms = Milestones::default()
            .with(Milestone::FabricationStart, date(2025, 1, 1))
            .with(Milestone::QcStart, date(2025, 4, 1))
            .with(Milestone::Ship, date(2025, 6, 1))
            .with(Milestone::Delivery, date(2025, 6, 10));

        let markers = milestone_markers(&ms, date(2025, 4, 1), DEFAULT_HORIZON_DAYS);
        let kinds: Vec<_> = markers.iter().map(|m| m.milestone).collect();
        assert_eq!(
            kinds,
            vec![Milestone::FabricationStart, Milestone::QcStart, Milestone::Ship]
        );
        assert!(markers[0].reached);
        assert!(markers[1].reached);
        assert!(!markers[2].reached);
        assert_eq!(markers[2].position, 100.0);
    }

    #[test]
    fn no_markers_without_anchor() {
        let ms = Milestones::default().with(Milestone::Ship, date(2025, 6, 1));
        assert!(milestone_markers(&ms, date(2025, 1, 1), DEFAULT_HORIZON_DAYS).is_empty());
    }
}
