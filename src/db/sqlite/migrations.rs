//! SQLite database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Create migrations table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    run_migration(conn, "001_journal_entries", CREATE_JOURNAL_ENTRIES_TABLE)?;

    tracing::info!("Database migrations completed");
    Ok(())
}

fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
    // Check if migration already applied
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?)",
        [name],
        |row| row.get(0),
    )?;

    if !exists {
        tracing::info!("Running migration: {}", name);
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
    }

    Ok(())
}

const CREATE_JOURNAL_ENTRIES_TABLE: &str = r#"
CREATE TABLE journal_entries (
    id TEXT PRIMARY KEY,
    stock_name TEXT NOT NULL,
    instrument_id TEXT,
    profit REAL NOT NULL,
    trade_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    trade_type TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_journal_trade_date ON journal_entries(trade_date);
CREATE INDEX IF NOT EXISTS idx_journal_created ON journal_entries(created_at);
"#;
