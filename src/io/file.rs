use std::path::Path;

use crate::error::ImportError;
use crate::model::Project;

/// Save projects to a JSON file as an array of API-shaped records.
pub fn save_projects(projects: &[Project], path: &Path) -> Result<(), ImportError> {
    let json = serde_json::to_string_pretty(projects)?;
    std::fs::write(path, json).map_err(|source| ImportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load projects from a JSON file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, ImportError> {
    let json = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let projects: Vec<Project> = serde_json::from_str(&json)?;
    tracing::debug!(path = %path.display(), count = projects.len(), "projects loaded");
    Ok(projects)
}
