//! Record service: validation, score computation, and scoped store access.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::record::{ProductivityRecord, RecordDraft};
use crate::storage::Database;

/// Orchestrates validation, score computation and persistence.
///
/// Holds only the database path and is cheap to clone. A connection is
/// opened for the span of a single operation and released when it returns,
/// on every exit path; validation failures never touch the store at all
/// (they are encoded in [`RecordDraft`] construction).
#[derive(Debug, Clone)]
pub struct RecordService {
    db_path: PathBuf,
}

impl RecordService {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Database> {
        Ok(Database::open(&self.db_path)?)
    }

    /// Persist a new record and return its id.
    pub fn create(&self, draft: RecordDraft) -> Result<i64> {
        let db = self.open()?;
        let id = db.insert(
            draft.timestamp(),
            draft.distracted_minutes(),
            draft.studied_minutes(),
            draft.score(),
        )?;
        debug!(id, "record created");
        Ok(id)
    }

    /// Overwrite an existing record, recomputing its score.
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` when `id` does not exist.
    pub fn update(&self, id: i64, draft: RecordDraft) -> Result<()> {
        let db = self.open()?;
        let changed = db.update(
            id,
            draft.timestamp(),
            draft.distracted_minutes(),
            draft.studied_minutes(),
            draft.score(),
        )?;
        if changed {
            debug!(id, "record updated");
            Ok(())
        } else {
            Err(CoreError::NotFound(id))
        }
    }

    /// Remove a record. Deleting an absent id is a no-op, not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let db = self.open()?;
        let removed = db.delete(id)?;
        debug!(id, removed, "record deleted");
        Ok(())
    }

    /// Fetch one record (backs the edit form).
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` when `id` does not exist.
    pub fn get(&self, id: i64) -> Result<ProductivityRecord> {
        self.open()?.get(id)?.ok_or(CoreError::NotFound(id))
    }

    /// All records, ascending by timestamp, ties broken by id.
    pub fn list(&self) -> Result<Vec<ProductivityRecord>> {
        Ok(self.open()?.list()?)
    }

    /// (timestamp, productivity) pairs in [`list`](Self::list) order, for
    /// chart rendering.
    pub fn series_for_chart(&self) -> Result<Vec<(NaiveDateTime, f64)>> {
        Ok(self.open()?.series()?)
    }
}
