use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::application::{Application, ApplicationStatus, UnknownStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}

/// Dashboard numbers for a collection: totals, per-status counts, and the
/// most recent creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ApplicationStats {
    pub fn count_for(&self, status: ApplicationStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, application: &Application) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => application.status == *status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

pub fn filter_by_status(applications: &[Application], filter: StatusFilter) -> Vec<Application> {
    applications
        .iter()
        .filter(|application| filter.matches(application))
        .cloned()
        .collect()
}

/// Counts per status in pipeline order, including statuses with no records.
pub fn status_counts(applications: &[Application]) -> Vec<StatusCount> {
    ApplicationStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: applications
                .iter()
                .filter(|application| application.status == status)
                .count(),
        })
        .collect()
}

pub fn last_updated(applications: &[Application]) -> Option<DateTime<Utc>> {
    applications
        .iter()
        .map(|application| application.created_at)
        .max()
}

pub fn compute_stats(applications: &[Application]) -> ApplicationStats {
    ApplicationStats {
        total: applications.len(),
        by_status: status_counts(applications),
        last_updated: last_updated(applications),
    }
}
