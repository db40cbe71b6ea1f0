//! History log - append-only record of finished sessions
//!
//! The log is an external collaborator. The core only appends summaries and
//! reads them back most-recent-first for reporting.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::SessionSummary;

/// History persistence errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("History encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Append-only session history
pub trait HistoryLog: Send + Sync {
    /// Record a finished session
    fn append(&self, summary: &SessionSummary) -> HistoryResult<()>;

    /// All recorded sessions, most recent first
    fn read_all(&self) -> HistoryResult<Vec<SessionSummary>>;
}

/// In-process history
#[derive(Debug, Default)]
pub struct MemoryHistoryLog {
    /// Most recent first
    entries: Mutex<Vec<SessionSummary>>,
}

impl MemoryHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl HistoryLog for MemoryHistoryLog {
    fn append(&self, summary: &SessionSummary) -> HistoryResult<()> {
        self.entries.lock().insert(0, summary.clone());
        Ok(())
    }

    fn read_all(&self) -> HistoryResult<Vec<SessionSummary>> {
        Ok(self.entries.lock().clone())
    }
}

/// History stored as a single JSON array, most recent first
pub struct JsonFileHistoryLog {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileHistoryLog {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed file contents. A missing file is empty history.
    fn load(&self) -> HistoryResult<Vec<SessionSummary>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    fn store(&self, entries: &[SessionSummary]) -> HistoryResult<()> {
        let encoded = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl HistoryLog for JsonFileHistoryLog {
    fn append(&self, summary: &SessionSummary) -> HistoryResult<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        entries.insert(0, summary.clone());
        self.store(&entries)?;
        tracing::debug!(path = %self.path.display(), sessions = entries.len(), "history appended");
        Ok(())
    }

    /// Unparsable history reads as empty. The file itself is left alone and
    /// `append` refuses to overwrite it.
    fn read_all(&self) -> HistoryResult<Vec<SessionSummary>> {
        let _guard = self.write_lock.lock();
        match self.load() {
            Err(HistoryError::Encoding(err)) => {
                tracing::warn!(path = %self.path.display(), error = %err, "unreadable history");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}
