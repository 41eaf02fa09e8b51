//! Lifecycle engine for manufacturing projects.
//!
//! Derives a project's phase from its milestone dates, counts business days
//! against a holiday calendar, projects milestones onto a 0–100 timeline and
//! ranks project lists. Every computation takes `today` explicitly and holds
//! no state, so callers choose their own refresh cadence.

pub mod calendar;
pub mod config;
pub mod duration;
pub mod error;
pub mod io;
pub mod lifecycle;
pub mod model;
pub mod ranking;
pub mod summary;

pub use calendar::HolidayCalendar;
pub use config::EngineSettings;
pub use duration::{ntc_duration, qc_duration, DurationBand};
pub use error::{ImportError, LifecycleError};
pub use lifecycle::{derive_phase, refresh_status, reset_manual_phase, set_manual_phase};
pub use model::timeline::{elapsed_progress, milestone_markers, project_position};
pub use model::{Milestone, Milestones, Phase, Project, TimelineWindow};
pub use ranking::{compare, filter_and_rank, matches_query, rank, RankingConfig, SortDirection, SortKey};
pub use summary::{summarize, ProjectSummary};
