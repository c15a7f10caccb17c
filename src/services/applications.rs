use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use validator::Validate;

use crate::models::application::{
    parse_applied_date, parse_status, Application, CreateApplicationRequest, UnknownStatus,
    UpdateApplicationRequest,
};
use crate::services::stats::{compute_stats, ApplicationStats};
use crate::services::storage::{ApplicationStore, StorageError};
use crate::utils::logger::{ApplicationEvent, LOGGER};

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("missing required fields: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),
    #[error("invalid applied date: {0}")]
    InvalidAppliedDate(#[from] chrono::ParseError),
    #[error("application {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// CRUD over the application collection.
///
/// Every operation reloads the whole collection from the store and, for
/// mutations, writes the whole collection back. Nothing is cached between calls.
/// Reads tolerate an unreadable store; mutations refuse to run against one.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Application> {
        self.store.load().await
    }

    pub async fn stats(&self) -> ApplicationStats {
        compute_stats(&self.store.load().await)
    }

    pub async fn create(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<Application, ApplicationError> {
        request.validate()?;
        let status = parse_status(request.status.as_deref().unwrap_or_default())?;
        let applied_date = parse_applied_date(request.applied_date.as_deref().unwrap_or_default())?;

        let mut applications = self.store.load_checked().await?;
        let now = Utc::now().trunc_subsecs(3);

        let application = Application {
            id: next_id(&applications, now),
            company: request.company.unwrap_or_default(),
            position: request.position.unwrap_or_default(),
            location: request.location.unwrap_or_default(),
            salary: request.salary.unwrap_or_default(),
            status,
            applied_date,
            notes: request.notes.unwrap_or_default(),
            created_at: now,
        };

        applications.push(application.clone());
        self.store.save(&applications).await?;

        LOGGER.application_event(
            ApplicationEvent::Created,
            application.id,
            json!({ "status": application.status }),
        );

        Ok(application)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: UpdateApplicationRequest,
    ) -> Result<Application, ApplicationError> {
        let mut applications = self.store.load_checked().await?;
        let existing = applications
            .iter_mut()
            .find(|application| application.id == id)
            .ok_or(ApplicationError::NotFound(id))?;

        changes.validate()?;
        let status = changes.status.as_deref().map(parse_status).transpose()?;
        let applied_date = changes
            .applied_date
            .as_deref()
            .map(parse_applied_date)
            .transpose()?;

        existing.apply(changes, status, applied_date);
        let updated = existing.clone();

        self.store.save(&applications).await?;

        LOGGER.application_event(
            ApplicationEvent::Updated,
            id,
            json!({ "status": updated.status }),
        );

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApplicationError> {
        let applications = self.store.load_checked().await?;
        let before = applications.len();
        let remaining: Vec<Application> = applications
            .into_iter()
            .filter(|application| application.id != id)
            .collect();

        if remaining.len() == before {
            return Err(ApplicationError::NotFound(id));
        }

        self.store.save(&remaining).await?;

        LOGGER.application_event(
            ApplicationEvent::Deleted,
            id,
            json!({ "remaining": remaining.len() }),
        );

        Ok(())
    }
}

/// Millisecond timestamp ids, bumped past the current maximum so that rapid
/// creates or a clock step backwards never reuse an id.
pub fn next_id(existing: &[Application], now: DateTime<Utc>) -> i64 {
    let from_clock = now.timestamp_millis();
    match existing.iter().map(|application| application.id).max() {
        Some(max) if max >= from_clock => max + 1,
        _ => from_clock,
    }
}
