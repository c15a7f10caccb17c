use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs;

use crate::models::application::Application;
use crate::utils::logger::LOGGER;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize applications: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{path} does not hold a valid application collection: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("storage path {0} has no parent directory")]
    InvalidPath(PathBuf),
    #[error("storage write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Whole-collection persistence for application records.
///
/// `load_checked` only treats an absent backing store as empty; anything it
/// cannot read or parse is an error, so mutations never overwrite records they
/// failed to load. `load` is the fail-open view used for reads.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn load_checked(&self) -> Result<Vec<Application>, StorageError>;

    async fn save(&self, applications: &[Application]) -> Result<(), StorageError>;

    async fn load(&self) -> Vec<Application> {
        match self.load_checked().await {
            Ok(applications) => applications,
            Err(e) => {
                LOGGER.storage_unreadable(&e);
                Vec::new()
            }
        }
    }
}

/// Stores the collection as one pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes into a uniquely named sibling temp file, then renames it over `path`.
/// Concurrent writers each get their own temp file; the last rename wins.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(StorageError::InvalidPath(path.to_path_buf())),
    };
    std::fs::create_dir_all(parent)?;

    let prefix = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => format!(".{}.", name),
        None => ".applications.".to_string(),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    // A failed persist hands the temp file back; dropping it removes it.
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ApplicationStore for JsonFileStore {
    async fn load_checked(&self) -> Result<Vec<Application>, StorageError> {
        let start_time = Instant::now();

        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No data file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let applications: Vec<Application> =
            serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        LOGGER.storage_operation(
            "load",
            &self.path,
            start_time.elapsed().as_millis(),
            applications.len(),
        );
        Ok(applications)
    }

    async fn save(&self, applications: &[Application]) -> Result<(), StorageError> {
        let start_time = Instant::now();

        let bytes = serde_json::to_vec_pretty(applications)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;

        LOGGER.storage_operation(
            "save",
            &self.path,
            start_time.elapsed().as_millis(),
            applications.len(),
        );
        Ok(())
    }
}
