//! Application state management

use crate::db::sqlite::models::TradeJournalEntry;
use crate::db::sqlite::SqliteDb;
use crate::error::Result;
use crate::heatmap::{self, Granularity, HeatmapBucket};
use crate::watchlist::{ReferenceSecurity, WatchlistRow};
use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application state shared across the UI layer.
///
/// Holds the journal store, the immutable reference-security cache and the
/// latest watchlist snapshot. Refresh operations replace snapshots
/// wholesale; nothing here is mutated in place behind the caller's back.
pub struct AppState {
    /// SQLite journal store
    pub db: Arc<SqliteDb>,

    /// Reference securities keyed by WKN, loaded once at startup
    reference: DashMap<String, ReferenceSecurity>,

    /// Latest watchlist snapshot
    watchlist: RwLock<Vec<WatchlistRow>>,

    /// Application data directory
    pub data_dir: PathBuf,
}

impl AppState {
    /// Create new application state rooted at `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        tracing::info!("Data directory: {:?}", data_dir);

        let db_path = data_dir.join("tradepro.db");
        let db = Arc::new(SqliteDb::new(&db_path)?);

        let reference = DashMap::new();
        for security in ReferenceSecurity::load_bundled()? {
            // first occurrence wins on duplicate WKNs
            reference
                .entry(security.wkn.clone())
                .or_insert(security);
        }
        tracing::info!("Loaded {} reference securities", reference.len());

        Ok(Self {
            db,
            reference,
            watchlist: RwLock::new(Vec::new()),
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Instrument id for a WKN, if the reference data knows it
    pub fn instrument_id_for(&self, wkn: &str) -> Option<String> {
        self.reference.get(wkn).map(|r| r.instrument_id.clone())
    }

    /// Reference list by value, for the row extractor
    pub fn reference_snapshot(&self) -> Vec<ReferenceSecurity> {
        self.reference.iter().map(|r| r.value().clone()).collect()
    }

    /// Replace the watchlist with a freshly extracted snapshot
    pub fn set_watchlist(&self, rows: Vec<WatchlistRow>) {
        *self.watchlist.write() = rows;
    }

    /// Current watchlist snapshot
    pub fn watchlist_snapshot(&self) -> Vec<WatchlistRow> {
        self.watchlist.read().clone()
    }

    /// Persist a journal entry
    pub fn log_trade(&self, entry: &TradeJournalEntry) -> Result<()> {
        self.db.create_entry(entry)
    }

    /// Heatmap buckets for the window of `granularity` containing `anchor`,
    /// computed over a fresh journal snapshot
    pub fn heatmap_for(
        &self,
        granularity: Granularity,
        anchor: NaiveDate,
    ) -> Result<Vec<HeatmapBucket>> {
        let entries = self.db.get_entries_by_date()?;
        Ok(heatmap::bucketize(&entries, granularity, anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::models::TradeType;
    use tempfile::tempdir;

    #[test]
    fn test_state_initializes_reference_cache() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path()).unwrap();

        assert!(state.instrument_id_for("865985").is_some());
        assert_eq!(state.instrument_id_for("DOESNOTEXIST"), None);
        assert!(!state.reference_snapshot().is_empty());
    }

    #[test]
    fn test_watchlist_snapshot_replacement() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path()).unwrap();
        assert!(state.watchlist_snapshot().is_empty());

        let rows = vec![WatchlistRow {
            wkn: "865985".to_string(),
            name: "Apple Inc.".to_string(),
            bid: "184,10".to_string(),
            ask: "184,30".to_string(),
            diff: "+1,20".to_string(),
            diff_percent: "+0,65%".to_string(),
            time: "17:35".to_string(),
            instrument_id: Some("2989463".to_string()),
        }];
        state.set_watchlist(rows.clone());
        assert_eq!(state.watchlist_snapshot(), rows);
    }

    #[test]
    fn test_heatmap_reads_journal_snapshot() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let entry = TradeJournalEntry::new("Apple Inc.", None, 50.0, TradeType::Profit, date);
        state.log_trade(&entry).unwrap();

        let buckets = state.heatmap_for(Granularity::Day, date).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_profit, 50.0);
        assert_eq!(buckets[0].trade_count, 1);
    }
}
