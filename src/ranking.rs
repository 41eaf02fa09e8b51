//! Ordering and free-text filtering for project lists.
//!
//! Missing sort values always land at the end of the list, whichever
//! direction is selected. Only the comparison of two present values is
//! flipped by `SortDirection::Descending`.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Project;

/// Date fields a list can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateKey {
    QcStart,
    Ship,
}

impl DateKey {
    fn value(self, project: &Project) -> Option<NaiveDate> {
        match self {
            DateKey::QcStart => project.milestones.qc_start,
            DateKey::Ship => project.milestones.ship,
        }
    }
}

/// Primary ranking field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Location,
    QcStart,
    Ship,
}

impl SortKey {
    fn as_date(self) -> Option<DateKey> {
        match self {
            SortKey::Location => None,
            SortKey::QcStart => Some(DateKey::QcStart),
            SortKey::Ship => Some(DateKey::Ship),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// How a project list should be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingConfig {
    pub primary_key: SortKey,
    /// Tie-breaker used when locations compare equal.
    #[serde(default)]
    pub secondary_key: Option<DateKey>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl RankingConfig {
    pub fn new(primary_key: SortKey) -> Self {
        Self {
            primary_key,
            secondary_key: None,
            direction: SortDirection::Ascending,
        }
    }

    pub fn then_by(mut self, key: DateKey) -> Self {
        self.secondary_key = Some(key);
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self::new(SortKey::Ship)
    }
}

/// Present values before missing ones; direction only orders two present values.
fn compare_present_first<T, F>(a: Option<T>, b: Option<T>, direction: SortDirection, cmp: F) -> Ordering
where
    F: FnOnce(T, T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(cmp(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_dates(a: &Project, b: &Project, key: DateKey, direction: SortDirection) -> Ordering {
    compare_present_first(key.value(a), key.value(b), direction, |x, y| x.cmp(&y))
}

fn location_key(project: &Project) -> Option<String> {
    project
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn compare_locations(a: &Project, b: &Project, direction: SortDirection) -> Ordering {
    compare_present_first(location_key(a), location_key(b), direction, |x, y| x.cmp(&y))
}

/// Compare two projects under `config`.
pub fn compare(a: &Project, b: &Project, config: &RankingConfig) -> Ordering {
    match config.primary_key.as_date() {
        Some(key) => compare_dates(a, b, key, config.direction),
        None => compare_locations(a, b, config.direction).then_with(|| {
            config
                .secondary_key
                .map_or(Ordering::Equal, |key| compare_dates(a, b, key, config.direction))
        }),
    }
}

/// Sort in place. Equal projects keep their relative order.
pub fn rank(projects: &mut [Project], config: &RankingConfig) {
    projects.sort_by(|a, b| compare(a, b, config));
}

/// Ordered references to `projects`, leaving the source untouched.
pub fn ranked<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    config: &RankingConfig,
) -> Vec<&'a Project> {
    let mut refs: Vec<&Project> = projects.into_iter().collect();
    refs.sort_by(|a, b| compare(a, b, config));
    refs
}

/// Case-insensitive substring match on project number, name and location.
///
/// An empty or whitespace-only query matches everything.
pub fn matches_query(project: &Project, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(project.project_number.as_str()),
        Some(project.name.as_str()),
        project.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter by `query`, then rank what is left.
pub fn filter_and_rank<'a>(
    projects: &'a [Project],
    query: &str,
    config: &RankingConfig,
) -> Vec<&'a Project> {
    ranked(projects.iter().filter(|p| matches_query(p, query)), config)
}
