use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::config::EngineSettings;
use crate::duration::{self, DurationBand};
use crate::lifecycle;
use crate::model::timeline::{milestone_markers, MilestoneMarker, TimelineWindow};
use crate::model::{Phase, Project};

/// Display values for one project, computed for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub phase: Phase,
    pub pinned: bool,
    pub qc_days: Option<u32>,
    pub qc_band: Option<DurationBand>,
    pub ntc_days: Option<u32>,
    pub ntc_band: Option<DurationBand>,
    pub window: TimelineWindow,
    pub elapsed: f64,
    pub markers: Vec<MilestoneMarker>,
}

impl ProjectSummary {
    pub fn compute(project: &Project, today: NaiveDate, settings: &EngineSettings) -> Self {
        let calendar = settings.calendar();
        let horizon = settings.default_horizon_days;
        let qc_days = duration::qc_duration(&project.milestones, calendar);
        let ntc_days = duration::ntc_duration(&project.milestones, calendar);
        let window = TimelineWindow::for_progress(&project.milestones, today, horizon);

        Self {
            id: project.id,
            phase: lifecycle::derive_phase(project, today),
            pinned: project.manual_status,
            qc_days,
            qc_band: qc_days.map(DurationBand::qc),
            ntc_days,
            ntc_band: ntc_days.map(DurationBand::standard),
            window,
            elapsed: window.elapsed(today),
            markers: milestone_markers(&project.milestones, today, horizon),
        }
    }
}

/// Summaries for a whole list, in input order.
pub fn summarize(projects: &[Project], today: NaiveDate, settings: &EngineSettings) -> Vec<ProjectSummary> {
    projects
        .iter()
        .map(|p| ProjectSummary::compute(p, today, settings))
        .collect()
}
