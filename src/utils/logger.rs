use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::services::storage::StorageError;

const SERVICE_NAME: &str = "job-tracker";
const SLOW_STORAGE_MS: u128 = 1000;

/// Collection changes worth an audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationEvent {
    Created,
    Updated,
    Deleted,
}

impl ApplicationEvent {
    pub fn name(self) -> &'static str {
        match self {
            ApplicationEvent::Created => "application_created",
            ApplicationEvent::Updated => "application_updated",
            ApplicationEvent::Deleted => "application_deleted",
        }
    }
}

/// One-line JSON events on top of `tracing`. HTTP requests are covered by
/// `TraceLayer`; this only reports storage and collection activity.
#[derive(Debug, Default)]
pub struct StructuredLogger;

impl StructuredLogger {
    /// Common envelope with `fields` merged in; `fields` wins on key clashes.
    pub fn entry(&self, event_type: &str, fields: Value) -> Value {
        let mut entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event_type": event_type,
            "service": SERVICE_NAME,
        });
        if let (Some(envelope), Value::Object(extra)) = (entry.as_object_mut(), fields) {
            envelope.extend(extra);
        }
        entry
    }

    pub fn storage_operation(
        &self,
        operation: &str,
        path: &Path,
        duration_ms: u128,
        record_count: usize,
    ) {
        let entry = self.entry(
            "storage_operation",
            json!({
                "operation": operation,
                "path": path.display().to_string(),
                "duration_ms": duration_ms,
                "record_count": record_count,
            }),
        );

        if duration_ms > SLOW_STORAGE_MS {
            warn!("Slow storage operation: {}", entry);
        } else {
            info!("{}", entry);
        }
    }

    /// Reads fall back to an empty collection; this records why.
    pub fn storage_unreadable(&self, error: &StorageError) {
        let entry = self.entry(
            "storage_unreadable",
            json!({ "error_message": error.to_string() }),
        );
        warn!("{}", entry);
    }

    pub fn application_event(&self, event: ApplicationEvent, application_id: i64, details: Value) {
        let mut fields = json!({
            "event_name": event.name(),
            "application_id": application_id,
        });
        if let (Some(target), Value::Object(extra)) = (fields.as_object_mut(), details) {
            target.extend(extra);
        }
        info!("{}", self.entry("application_event", fields));
    }
}

pub static LOGGER: StructuredLogger = StructuredLogger;
