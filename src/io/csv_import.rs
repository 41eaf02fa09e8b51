use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::ImportError;
use crate::model::project::clamp_percent;
use crate::model::{Milestone, Phase, ProgressMetrics, Project};

/// Try parsing a date string with several common formats.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // API exports carry a time component; only the date matters.
    let s = s.split(['T', ' ']).next().unwrap_or(s);
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
pub(crate) fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs && semicolons > 0 {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
pub(crate) fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_', '.'], "")
}

pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>, ImportError> {
    std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn reader_for(content: &[u8]) -> csv::Reader<&[u8]> {
    let first_line = content.split(|b| *b == b'\n').next().unwrap_or_default();
    csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(&String::from_utf8_lossy(first_line)))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Number,
    Name,
    Location,
    Date(Milestone),
    ExecutiveReviewTime,
    Status,
    Manual,
    MeCad,
    EeDesign,
    ItDesign,
    NtcDesign,
}

fn header_to_column(normalized: &str) -> Option<Column> {
    let column = match normalized {
        "projectnumber" | "number" | "projectno" | "job" | "jobnumber" | "no" => Column::Number,
        "name" | "project" | "projectname" | "title" | "description" => Column::Name,
        "location" | "bay" | "site" => Column::Location,

        "contractdate" | "contract" => Column::Date(Milestone::ContractDate),
        "fabricationstart" | "fabstart" | "fabrication" => Column::Date(Milestone::FabricationStart),
        "assemblystart" | "assembly" => Column::Date(Milestone::AssemblyStart),
        "wrapgraphics" | "wrap" => Column::Date(Milestone::WrapGraphics),
        "ntctesting" | "ntc" | "ntcstart" => Column::Date(Milestone::NtcTesting),
        "qcstart" | "qc" => Column::Date(Milestone::QcStart),
        "executivereview" | "review" | "execreview" => Column::Date(Milestone::ExecutiveReview),
        "ship" | "shipdate" | "shipping" => Column::Date(Milestone::Ship),
        "delivery" | "deliverydate" => Column::Date(Milestone::Delivery),

        "executivereviewtime" | "reviewtime" => Column::ExecutiveReviewTime,
        "status" | "phase" | "stage" => Column::Status,
        "manualstatus" | "manual" | "pinned" => Column::Manual,

        "mecadprogress" | "mecad" => Column::MeCad,
        "eedesignprogress" | "eedesign" => Column::EeDesign,
        "itdesignprogress" | "itdesign" => Column::ItDesign,
        "ntcdesignprogress" | "ntcdesign" => Column::NtcDesign,

        _ => return None,
    };
    Some(column)
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "x")
}

fn parse_percent(s: &str) -> Option<u8> {
    let s = s.trim().trim_end_matches('%').trim();
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| clamp_percent(v.round() as i64))
}

/// Import projects from a CSV file.
///
/// Auto-detects the delimiter and matches headers loosely ("Project No",
/// "QC Start", ...). A row needs a project number or a name; rows without
/// either are skipped. Unparseable dates are dropped with a warning rather
/// than failing the row. Returns `(projects, skipped_count)`.
pub fn import_projects(path: &Path) -> Result<(Vec<Project>, usize), ImportError> {
    let content = read_source(path)?;
    import_projects_from_bytes(&content)
}

/// Same as [`import_projects`], reading from an in-memory string.
pub fn import_projects_from_str(content: &str) -> Result<(Vec<Project>, usize), ImportError> {
    import_projects_from_bytes(content.as_bytes())
}

fn import_projects_from_bytes(content: &[u8]) -> Result<(Vec<Project>, usize), ImportError> {
    let mut reader = reader_for(content);
    let headers = reader.headers()?.clone();

    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let identifiable = columns
        .iter()
        .any(|c| matches!(c, Some(Column::Number | Column::Name)));
    if !identifiable {
        return Err(ImportError::MissingColumns {
            required: "project number or name",
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut projects = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut project = Project::default();
        let mut metrics = ProgressMetrics::default();

        for (field, column) in record.iter().zip(columns.iter()) {
            let Some(column) = column else { continue };
            if field.is_empty() {
                continue;
            }
            match *column {
                Column::Number => project.project_number = field.to_string(),
                Column::Name => project.name = field.to_string(),
                Column::Location => project.location = Some(field.to_string()),
                Column::Date(milestone) => match parse_date(field) {
                    Some(d) => project.milestones.set(milestone, Some(d)),
                    None => warn!(row, milestone = milestone.label(), value = field, "ignoring invalid date"),
                },
                Column::ExecutiveReviewTime => project.executive_review_time = Some(field.to_string()),
                Column::Status => match field.parse::<Phase>() {
                    Ok(phase) => project.status = phase,
                    Err(e) => warn!(row, error = %e, "ignoring unknown status"),
                },
                Column::Manual => project.manual_status = parse_flag(field),
                Column::MeCad => metrics.me_cad_progress = parse_percent(field).unwrap_or(0),
                Column::EeDesign => metrics.ee_design_progress = parse_percent(field).unwrap_or(0),
                Column::ItDesign => metrics.it_design_progress = parse_percent(field).unwrap_or(0),
                Column::NtcDesign => metrics.ntc_design_progress = parse_percent(field).unwrap_or(0),
            }
        }

        if project.project_number.is_empty() && project.name.is_empty() {
            skipped += 1;
            continue;
        }

        for v in project.milestones.sequence_violations() {
            warn!(
                row,
                project = %project.project_number,
                earlier = v.earlier.label(),
                later = v.later.label(),
                "milestones out of order"
            );
        }

        project.progress = metrics;
        projects.push(project);
    }

    if projects.is_empty() && skipped > 0 {
        return Err(ImportError::NoValidRows { skipped });
    }
    if projects.is_empty() {
        return Err(ImportError::Empty);
    }

    Ok((projects, skipped))
}
