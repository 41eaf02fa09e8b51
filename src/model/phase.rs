use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Manufacturing lifecycle stage of a project.
///
/// Variants are declared in production sequence, so the derived `Ord`
/// matches the order a project moves through the shop floor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    NotStarted,
    InFab,
    InAssembly,
    InWrap,
    InNtcTesting,
    InQc,
    Completed,
}

impl Phase {
    /// All phases in production order.
    pub const ALL: [Phase; 7] = [
        Phase::NotStarted,
        Phase::InFab,
        Phase::InAssembly,
        Phase::InWrap,
        Phase::InNtcTesting,
        Phase::InQc,
        Phase::Completed,
    ];

    /// Human-readable label used on boards and exports.
    pub fn label(self) -> &'static str {
        match self {
            Phase::NotStarted => "Not Started",
            Phase::InFab => "In Fab",
            Phase::InAssembly => "In Assembly",
            Phase::InWrap => "In Wrap",
            Phase::InNtcTesting => "In NTC Testing",
            Phase::InQc => "In QC",
            Phase::Completed => "Completed",
        }
    }

    /// Wire form used by the records API (`IN_FAB`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Phase::NotStarted => "NOT_STARTED",
            Phase::InFab => "IN_FAB",
            Phase::InAssembly => "IN_ASSEMBLY",
            Phase::InWrap => "IN_WRAP",
            Phase::InNtcTesting => "IN_NTC_TESTING",
            Phase::InQc => "IN_QC",
            Phase::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase '{0}'")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    /// Accepts the wire code or the label, ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        match key.as_str() {
            "notstarted" | "new" => Ok(Phase::NotStarted),
            "infab" | "fab" | "fabrication" => Ok(Phase::InFab),
            "inassembly" | "assembly" => Ok(Phase::InAssembly),
            "inwrap" | "wrap" | "wrapgraphics" => Ok(Phase::InWrap),
            "inntctesting" | "ntctesting" | "ntc" => Ok(Phase::InNtcTesting),
            "inqc" | "qc" => Ok(Phase::InQc),
            "completed" | "complete" | "done" | "shipped" => Ok(Phase::Completed),
            _ => Err(UnknownPhase(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_order_matches_ordering() {
        for pair in Phase::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Phase::ALL.iter().max(), Some(&Phase::Completed));
    }

    #[test]
    fn default_is_not_started() {
        assert_eq!(Phase::default(), Phase::NotStarted);
    }

    #[test]
    fn parses_codes_and_labels() {
        for phase in Phase::ALL {
            assert_eq!(phase.code().parse::<Phase>(), Ok(phase));
            assert_eq!(phase.label().parse::<Phase>(), Ok(phase));
        }
        assert_eq!("in-ntc-testing".parse::<Phase>(), Ok(Phase::InNtcTesting));
        assert!("painting".parse::<Phase>().is_err());
    }

    #[test]
    fn serializes_as_wire_code() {
        let json = serde_json::to_string(&Phase::InNtcTesting).unwrap();
        assert_eq!(json, "\"IN_NTC_TESTING\"");
        let back: Phase = serde_json::from_str("\"IN_QC\"").unwrap();
        assert_eq!(back, Phase::InQc);
    }
}
