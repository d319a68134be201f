//! Trade journal persistence

use crate::db::sqlite::models::{TradeJournalEntry, TradeType};
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "id, stock_name, instrument_id, profit, trade_date, created_at, trade_type";

fn conversion_error(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, err.into())
}

fn row_to_entry(row: &Row) -> rusqlite::Result<TradeJournalEntry> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| conversion_error(0, e))?;

    let trade_date: String = row.get(4)?;
    let trade_date =
        NaiveDate::parse_from_str(&trade_date, "%Y-%m-%d").map_err(|e| conversion_error(4, e))?;

    let created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| conversion_error(5, e))?
        .with_timezone(&Utc);

    let trade_type: String = row.get(6)?;
    let trade_type: TradeType = trade_type.parse().map_err(|e| conversion_error(6, e))?;

    Ok(TradeJournalEntry {
        id,
        stock_name: row.get(1)?,
        instrument_id: row.get(2)?,
        profit: row.get(3)?,
        trade_date,
        created_at,
        trade_type,
    })
}

/// Insert a new journal entry
pub fn create_entry(conn: &Connection, entry: &TradeJournalEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO journal_entries
            (id, stock_name, instrument_id, profit, trade_date, created_at, trade_type)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            entry.id.to_string(),
            entry.stock_name,
            entry.instrument_id,
            entry.profit,
            entry.trade_date.format("%Y-%m-%d").to_string(),
            entry.created_at.to_rfc3339(),
            entry.trade_type.as_str(),
        ],
    )?;

    Ok(())
}

/// All entries, newest save first
pub fn get_entries_by_timestamp(conn: &Connection) -> Result<Vec<TradeJournalEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM journal_entries ORDER BY created_at DESC",
        SELECT_COLUMNS
    ))?;

    let entries = stmt
        .query_map([], row_to_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// All entries, most recent trade date first
pub fn get_entries_by_date(conn: &Connection) -> Result<Vec<TradeJournalEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM journal_entries ORDER BY trade_date DESC, created_at DESC",
        SELECT_COLUMNS
    ))?;

    let entries = stmt
        .query_map([], row_to_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// Delete an entry by id
pub fn delete_entry(conn: &Connection, id: Uuid) -> Result<()> {
    let rows = conn.execute(
        "DELETE FROM journal_entries WHERE id = ?",
        [id.to_string()],
    )?;

    if rows == 0 {
        return Err(AppError::NotFound(format!("Journal entry not found: {}", id)));
    }

    Ok(())
}

/// Total number of journal entries
pub fn entry_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM journal_entries", [], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::migrations;

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn entry(name: &str, profit: f64, date: (i32, u32, u32)) -> TradeJournalEntry {
        TradeJournalEntry::new(
            name,
            Some("2989463".to_string()),
            profit,
            TradeType::from_amount(profit),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    #[test]
    fn test_create_and_fetch_round_trip() {
        let conn = create_test_db();
        let original = entry("Apple Inc.", 120.5, (2025, 10, 3));
        create_entry(&conn, &original).unwrap();

        let fetched = get_entries_by_timestamp(&conn).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0], original);
    }

    #[test]
    fn test_fetch_sorted_by_trade_date() {
        let conn = create_test_db();
        create_entry(&conn, &entry("A", 10.0, (2025, 10, 1))).unwrap();
        create_entry(&conn, &entry("B", -5.0, (2025, 10, 3))).unwrap();
        create_entry(&conn, &entry("C", 7.0, (2025, 10, 2))).unwrap();

        let entries = get_entries_by_date(&conn).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.stock_name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn test_delete_entry() {
        let conn = create_test_db();
        let e = entry("A", 10.0, (2025, 10, 1));
        create_entry(&conn, &e).unwrap();
        assert_eq!(entry_count(&conn).unwrap(), 1);

        delete_entry(&conn, e.id).unwrap();
        assert_eq!(entry_count(&conn).unwrap(), 0);

        let err = delete_entry(&conn, e.id).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_loss_entry_preserves_negative_profit() {
        let conn = create_test_db();
        create_entry(&conn, &entry("Tesla Inc.", -42.0, (2025, 10, 3))).unwrap();

        let entries = get_entries_by_timestamp(&conn).unwrap();
        assert_eq!(entries[0].profit, -42.0);
        assert_eq!(entries[0].trade_type, TradeType::Loss);
    }
}
