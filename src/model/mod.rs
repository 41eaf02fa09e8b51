pub mod milestone;
pub mod phase;
pub mod project;
pub mod timeline;

pub use milestone::{Milestone, Milestones, SequenceViolation};
pub use phase::{Phase, UnknownPhase};
pub use project::{ProgressMetrics, Project};
pub use timeline::{MilestoneMarker, TimelineWindow};
