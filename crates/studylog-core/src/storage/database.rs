//! SQLite-based record storage.
//!
//! One table of productivity records keyed by rowid. Timestamps are stored
//! as `%Y-%m-%d %H:%M` text, which sorts correctly as a string.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::DatabaseError;
use crate::record::{ProductivityRecord, TIMESTAMP_FORMAT};

/// SQLite database holding productivity records.
///
/// One value wraps one connection. Callers open a `Database` for the span
/// of a single operation and drop it afterwards; nothing here is shared
/// across operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `path`, creating the file and schema if they
    /// don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS records (
                    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp          TEXT NOT NULL,
                    distracted_minutes REAL NOT NULL,
                    studied_minutes    REAL NOT NULL,
                    productivity       REAL NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_records_timestamp ON records(timestamp);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert a new record and return its id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert(
        &self,
        timestamp: NaiveDateTime,
        distracted_minutes: f64,
        studied_minutes: f64,
        productivity: f64,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO records (timestamp, distracted_minutes, studied_minutes, productivity)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                distracted_minutes,
                studied_minutes,
                productivity,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch a record by id.
    pub fn get(&self, id: i64) -> Result<Option<ProductivityRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, distracted_minutes, studied_minutes, productivity
             FROM records WHERE id = ?1",
        )?;
        match stmt.query_row(params![id], row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a record in place, preserving its id.
    ///
    /// Returns `false` when the id does not exist.
    pub fn update(
        &self,
        id: i64,
        timestamp: NaiveDateTime,
        distracted_minutes: f64,
        studied_minutes: f64,
        productivity: f64,
    ) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE records
             SET timestamp = ?1, distracted_minutes = ?2, studied_minutes = ?3, productivity = ?4
             WHERE id = ?5",
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                distracted_minutes,
                studied_minutes,
                productivity,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a record. Returns the number of rows removed (0 or 1).
    pub fn delete(&self, id: i64) -> Result<usize, DatabaseError> {
        Ok(self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])?)
    }

    /// All records, ascending by timestamp, ties broken by id (insertion
    /// order).
    pub fn list(&self) -> Result<Vec<ProductivityRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, distracted_minutes, studied_minutes, productivity
             FROM records ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map([], row_to_record)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// (timestamp, productivity) pairs in the same order as [`list`](Self::list).
    pub fn series(&self) -> Result<Vec<(NaiveDateTime, f64)>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, productivity FROM records ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let ts: String = row.get(0)?;
            Ok((parse_stored_timestamp(&ts, 0)?, row.get::<_, f64>(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductivityRecord> {
    let ts: String = row.get(1)?;
    Ok(ProductivityRecord {
        id: row.get(0)?,
        timestamp: parse_stored_timestamp(&ts, 1)?,
        distracted_minutes: row.get(2)?,
        studied_minutes: row.get(3)?,
        productivity: row.get(4)?,
    })
}

fn parse_stored_timestamp(value: &str, column: usize) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
