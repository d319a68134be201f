//! SQLite database module

pub mod models;
mod journal;
mod migrations;

use crate::error::Result;
use models::TradeJournalEntry;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use uuid::Uuid;

/// SQLite database wrapper
pub struct SqliteDb {
    conn: Mutex<Connection>,
}

impl SqliteDb {
    /// Create new SQLite database connection
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        // Run migrations
        db.run_migrations()?;

        Ok(db)
    }

    /// In-memory database, used by tests and previews
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== Journal Methods ==========

    /// Persist a new journal entry
    pub fn create_entry(&self, entry: &TradeJournalEntry) -> Result<()> {
        let conn = self.conn.lock();
        journal::create_entry(&conn, entry)
    }

    /// Snapshot of all entries, newest save first
    pub fn get_entries_by_timestamp(&self) -> Result<Vec<TradeJournalEntry>> {
        let conn = self.conn.lock();
        journal::get_entries_by_timestamp(&conn)
    }

    /// Snapshot of all entries, most recent trade date first
    pub fn get_entries_by_date(&self) -> Result<Vec<TradeJournalEntry>> {
        let conn = self.conn.lock();
        journal::get_entries_by_date(&conn)
    }

    /// Delete an entry by id
    pub fn delete_entry(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock();
        journal::delete_entry(&conn, id)
    }

    /// Total number of journal entries
    pub fn entry_count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        journal::entry_count(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::TradeType;
    use tempfile::tempdir;

    #[test]
    fn test_on_disk_db_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tradepro.db");

        let entry = TradeJournalEntry::new(
            "NVIDIA Corp.",
            Some("2987101".to_string()),
            300.0,
            TradeType::Profit,
            NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
        );

        {
            let db = SqliteDb::new(&path).unwrap();
            db.create_entry(&entry).unwrap();
        }

        let db = SqliteDb::new(&path).unwrap();
        let entries = db.get_entries_by_timestamp().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
    }
}
