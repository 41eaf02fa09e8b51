use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the dated checkpoints a manufacturing project passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Milestone {
    ContractDate,
    FabricationStart,
    AssemblyStart,
    WrapGraphics,
    NtcTesting,
    QcStart,
    ExecutiveReview,
    Ship,
    Delivery,
}

impl Milestone {
    /// Every milestone in canonical order.
    pub const ALL: [Milestone; 9] = [
        Milestone::ContractDate,
        Milestone::FabricationStart,
        Milestone::AssemblyStart,
        Milestone::WrapGraphics,
        Milestone::NtcTesting,
        Milestone::QcStart,
        Milestone::ExecutiveReview,
        Milestone::Ship,
        Milestone::Delivery,
    ];

    /// The milestones drawn as markers on a project timeline.
    pub const TIMELINE: [Milestone; 6] = [
        Milestone::FabricationStart,
        Milestone::AssemblyStart,
        Milestone::WrapGraphics,
        Milestone::NtcTesting,
        Milestone::QcStart,
        Milestone::Ship,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Milestone::ContractDate => "Contract",
            Milestone::FabricationStart => "Fabrication Start",
            Milestone::AssemblyStart => "Assembly Start",
            Milestone::WrapGraphics => "Wrap Graphics",
            Milestone::NtcTesting => "NTC Testing",
            Milestone::QcStart => "QC Start",
            Milestone::ExecutiveReview => "Executive Review",
            Milestone::Ship => "Ship",
            Milestone::Delivery => "Delivery",
        }
    }
}

/// The full set of milestone dates for a project. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestones {
    pub contract_date: Option<NaiveDate>,
    pub fabrication_start: Option<NaiveDate>,
    pub assembly_start: Option<NaiveDate>,
    pub wrap_graphics: Option<NaiveDate>,
    pub ntc_testing: Option<NaiveDate>,
    pub qc_start: Option<NaiveDate>,
    pub executive_review: Option<NaiveDate>,
    pub ship: Option<NaiveDate>,
    pub delivery: Option<NaiveDate>,
}

/// Two adjacent present milestones whose dates run backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceViolation {
    pub earlier: Milestone,
    pub later: Milestone,
    pub earlier_date: NaiveDate,
    pub later_date: NaiveDate,
}

impl Milestones {
    pub fn get(&self, milestone: Milestone) -> Option<NaiveDate> {
        match milestone {
            Milestone::ContractDate => self.contract_date,
            Milestone::FabricationStart => self.fabrication_start,
            Milestone::AssemblyStart => self.assembly_start,
            Milestone::WrapGraphics => self.wrap_graphics,
            Milestone::NtcTesting => self.ntc_testing,
            Milestone::QcStart => self.qc_start,
            Milestone::ExecutiveReview => self.executive_review,
            Milestone::Ship => self.ship,
            Milestone::Delivery => self.delivery,
        }
    }

    pub fn set(&mut self, milestone: Milestone, date: Option<NaiveDate>) {
        let slot = match milestone {
            Milestone::ContractDate => &mut self.contract_date,
            Milestone::FabricationStart => &mut self.fabrication_start,
            Milestone::AssemblyStart => &mut self.assembly_start,
            Milestone::WrapGraphics => &mut self.wrap_graphics,
            Milestone::NtcTesting => &mut self.ntc_testing,
            Milestone::QcStart => &mut self.qc_start,
            Milestone::ExecutiveReview => &mut self.executive_review,
            Milestone::Ship => &mut self.ship,
            Milestone::Delivery => &mut self.delivery,
        };
        *slot = date;
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, milestone: Milestone, date: NaiveDate) -> Self {
        self.set(milestone, Some(date));
        self
    }

    /// True when no milestone has a date yet.
    pub fn is_empty(&self) -> bool {
        Milestone::ALL.iter().all(|m| self.get(*m).is_none())
    }

    /// Present milestones in canonical order.
    pub fn present(&self) -> impl Iterator<Item = (Milestone, NaiveDate)> + '_ {
        Milestone::ALL
            .iter()
            .filter_map(|m| self.get(*m).map(|d| (*m, d)))
    }

    /// Report places where a later milestone is dated before the one preceding it.
    ///
    /// Absent milestones are skipped, so each present date is compared with the
    /// nearest present date before it in canonical order.
    pub fn sequence_violations(&self) -> Vec<SequenceViolation> {
        let present: Vec<_> = self.present().collect();
        present
            .windows(2)
            .filter(|w| w[1].1 < w[0].1)
            .map(|w| SequenceViolation {
                earlier: w[0].0,
                later: w[1].0,
                earlier_date: w[0].1,
                later_date: w[1].1,
            })
            .collect()
    }
}
