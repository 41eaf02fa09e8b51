use std::path::Path;

use chrono::NaiveDate;

use crate::config::EngineSettings;
use crate::duration::format_days;
use crate::error::ImportError;
use crate::model::Project;
use crate::summary::ProjectSummary;

const HEADER: [&str; 9] = [
    "Project Number",
    "Name",
    "Location",
    "Phase",
    "Fabrication Start",
    "Ship",
    "QC Days",
    "NTC Days",
    "Progress",
];

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn write_board<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    projects: &[Project],
    today: NaiveDate,
    settings: &EngineSettings,
) -> Result<(), ImportError> {
    wtr.write_record(HEADER)?;
    for project in projects {
        let summary = ProjectSummary::compute(project, today, settings);
        let fabrication = format_date(project.milestones.fabrication_start);
        let ship = format_date(project.milestones.ship);
        let qc = format_days(summary.qc_days);
        let ntc = format_days(summary.ntc_days);
        let progress = format!("{:.0}%", summary.elapsed);
        wtr.write_record([
            project.project_number.as_str(),
            project.name.as_str(),
            project.location.as_deref().unwrap_or(""),
            summary.phase.label(),
            fabrication.as_str(),
            ship.as_str(),
            qc.as_str(),
            ntc.as_str(),
            progress.as_str(),
        ])?;
    }
    Ok(())
}

/// Export a status board to a semicolon-delimited CSV file.
///
/// Phases and durations are computed for `today`, so the file is a snapshot.
/// Returns the number of projects written.
pub fn export_board(
    projects: &[Project],
    today: NaiveDate,
    settings: &EngineSettings,
    path: &Path,
) -> Result<usize, ImportError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    write_board(&mut wtr, projects, today, settings)?;
    wtr.flush().map_err(|source| ImportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(projects.len())
}

/// Render the board into a string instead of a file.
pub fn board_to_string(
    projects: &[Project],
    today: NaiveDate,
    settings: &EngineSettings,
) -> Result<String, ImportError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(Vec::new());
    write_board(&mut wtr, projects, today, settings)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| ImportError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
