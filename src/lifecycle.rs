//! Lifecycle phase derivation and the manual override switch.
//!
//! The derived phase is a pure function of the milestone dates and the
//! caller-supplied `today`. Callers re-run it whenever they refresh; nothing
//! here keeps time or schedules itself.

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::error::LifecycleError;
use crate::model::{Milestone, Milestones, Phase, Project};

/// Milestone checks in precedence order. The first milestone reached wins.
const PRECEDENCE: [(Milestone, Phase); 6] = [
    (Milestone::Ship, Phase::Completed),
    (Milestone::QcStart, Phase::InQc),
    (Milestone::NtcTesting, Phase::InNtcTesting),
    (Milestone::WrapGraphics, Phase::InWrap),
    (Milestone::AssemblyStart, Phase::InAssembly),
    (Milestone::FabricationStart, Phase::InFab),
];

/// Phase implied by the milestone dates alone, ignoring any manual pin.
pub fn phase_from_milestones(milestones: &Milestones, today: NaiveDate) -> Phase {
    PRECEDENCE
        .iter()
        .find(|(milestone, _)| milestones.get(*milestone).is_some_and(|d| today >= d))
        .map_or(Phase::NotStarted, |(_, phase)| *phase)
}

/// Current phase of a project.
///
/// A pinned project reports its stored status unchanged; otherwise the phase
/// comes from the milestone dates.
pub fn derive_phase(project: &Project, today: NaiveDate) -> Phase {
    if project.manual_status {
        trace!(project = %project.project_number, phase = %project.status, "phase pinned");
        return project.status;
    }
    let phase = phase_from_milestones(&project.milestones, today);
    trace!(project = %project.project_number, %today, %phase, "phase derived");
    phase
}

/// Write the derived phase into `status` unless the project is pinned.
///
/// Returns the phase now in effect.
pub fn refresh_status(project: &mut Project, today: NaiveDate) -> Phase {
    let phase = derive_phase(project, today);
    if phase != project.status {
        debug!(
            project = %project.project_number,
            from = %project.status,
            to = %phase,
            "status changed"
        );
        project.status = phase;
    }
    phase
}

/// Refresh every project in a collection.
pub fn refresh_all(projects: &mut [Project], today: NaiveDate) {
    for project in projects.iter_mut() {
        refresh_status(project, today);
    }
}

/// Check whether a manual change to `target` would be accepted.
///
/// Completion is only allowed once the ship date has strictly passed.
pub fn validate_manual_phase(
    milestones: &Milestones,
    target: Phase,
    today: NaiveDate,
) -> Result<(), LifecycleError> {
    if target != Phase::Completed {
        return Ok(());
    }
    match milestones.ship {
        Some(ship) if today > ship => Ok(()),
        ship => Err(LifecycleError::CompletionBeforeShip { ship, today }),
    }
}

/// Pin the project to `target`.
///
/// On rejection the project is not modified.
pub fn set_manual_phase(
    project: &mut Project,
    target: Phase,
    today: NaiveDate,
) -> Result<(), LifecycleError> {
    if let Err(err) = validate_manual_phase(&project.milestones, target, today) {
        warn!(project = %project.project_number, %target, %err, "manual phase rejected");
        return Err(err);
    }
    debug!(project = %project.project_number, from = %project.status, to = %target, "phase pinned manually");
    project.manual_status = true;
    project.status = target;
    Ok(())
}

/// Clear the manual pin. The next derivation recomputes from the dates.
pub fn reset_manual_phase(project: &mut Project) {
    if project.manual_status {
        debug!(project = %project.project_number, pinned = %project.status, "manual phase cleared");
    }
    project.manual_status = false;
}
