use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::milestone::Milestones;
use super::phase::Phase;

/// Design progress figures, each a percentage from 0 to 100.
///
/// Display-only: they never influence the lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressMetrics {
    #[serde(with = "percent_serde")]
    pub me_cad_progress: u8,
    #[serde(with = "percent_serde")]
    pub ee_design_progress: u8,
    #[serde(with = "percent_serde")]
    pub it_design_progress: u8,
    #[serde(with = "percent_serde")]
    pub ntc_design_progress: u8,
}

impl ProgressMetrics {
    /// Build a metrics set, clamping every value into 0..=100.
    pub fn new(me_cad: i64, ee_design: i64, it_design: i64, ntc_design: i64) -> Self {
        Self {
            me_cad_progress: clamp_percent(me_cad),
            ee_design_progress: clamp_percent(ee_design),
            it_design_progress: clamp_percent(it_design),
            ntc_design_progress: clamp_percent(ntc_design),
        }
    }
}

pub(crate) fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// A manufacturing project as served by the records API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(default)]
    pub project_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(flatten)]
    pub milestones: Milestones,
    /// Time of day for the executive review, kept verbatim for display.
    #[serde(default)]
    pub executive_review_time: Option<String>,
    /// When set, `status` is pinned and derivation leaves it alone.
    #[serde(default)]
    pub manual_status: bool,
    #[serde(default)]
    pub status: Phase,
    #[serde(flatten)]
    pub progress: ProgressMetrics,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            project_number: String::new(),
            name: String::new(),
            location: None,
            milestones: Milestones::default(),
            executive_review_time: None,
            manual_status: false,
            status: Phase::NotStarted,
            progress: ProgressMetrics::default(),
        }
    }
}

impl Project {
    pub fn new(project_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_number: project_number.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_milestones(mut self, milestones: Milestones) -> Self {
        self.milestones = milestones;
        self
    }
}

/// Serde helper that clamps incoming percentages instead of rejecting them.
mod percent_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u8, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Ok(raw.round().clamp(0.0, 100.0) as u8)
    }
}
