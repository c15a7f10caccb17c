use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    #[serde(rename = "Phone Screen")]
    PhoneScreen,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Pipeline order, used for stat cards and filter options.
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreen,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::PhoneScreen => "Phone Screen",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Body of `POST /api/applications`.
///
/// Every field is optional at the wire level so that a missing or empty
/// required field surfaces as a validation error instead of a JSON rejection.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(required, length(min = 1))]
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub position: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    #[validate(required, length(min = 1))]
    pub status: Option<String>,
    #[validate(required, length(min = 1))]
    pub applied_date: Option<String>,
    pub notes: Option<String>,
}

/// Body of `PUT /api/applications/:id`. Absent or null fields are left untouched.
///
/// `id` and `createdAt` are not part of the shape, so a body carrying them has
/// those keys ignored.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn parse_status(raw: &str) -> Result<ApplicationStatus, UnknownStatus> {
    raw.parse()
}

pub fn parse_applied_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
}

impl Application {
    /// Shallow field-by-field merge. The caller has already parsed the typed
    /// fields, so this step cannot fail.
    pub fn apply(
        &mut self,
        changes: UpdateApplicationRequest,
        status: Option<ApplicationStatus>,
        applied_date: Option<NaiveDate>,
    ) {
        if let Some(company) = changes.company {
            self.company = company;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(salary) = changes.salary {
            self.salary = salary;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(applied_date) = applied_date {
            self.applied_date = applied_date;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
    }
}
