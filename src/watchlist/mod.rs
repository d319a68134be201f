//! Watchlist row extraction
//!
//! Turns the scraped watchlist table (rows of cell text, already parsed out
//! of the page by [`crate::services::watchlist`]) into typed rows, joining
//! each row against the bundled reference dataset to resolve the charting
//! instrument id.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Minimum cell count for a data row; anything shorter is a header or
/// filler row and gets skipped.
const MIN_COLUMNS: usize = 7;

/// One row of the watchlist, as displayed.
///
/// Prices and changes stay display strings; the only derived attribute is
/// `instrument_id`, which is `None` when the WKN has no reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistRow {
    pub wkn: String,
    pub name: String,
    pub bid: String,
    pub ask: String,
    pub diff: String,
    pub diff_percent: String,
    pub time: String,
    pub instrument_id: Option<String>,
}

/// Static reference entry mapping a WKN to its charting instrument id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSecurity {
    pub wkn: String,
    pub name: String,
    pub instrument_id: String,
}

impl ReferenceSecurity {
    /// Load the bundled reference dataset, compiled into the binary
    pub fn load_bundled() -> Result<Vec<ReferenceSecurity>> {
        let securities: Vec<ReferenceSecurity> = serde_json::from_str(include_str!("stocks.json"))?;
        tracing::debug!("Loaded {} reference securities", securities.len());
        Ok(securities)
    }
}

/// First-match instrument id lookup. Duplicate WKNs in the reference list
/// resolve to the first occurrence.
pub fn instrument_id_for<'a>(wkn: &str, refs: &'a [ReferenceSecurity]) -> Option<&'a str> {
    refs.iter()
        .find(|r| r.wkn == wkn)
        .map(|r| r.instrument_id.as_str())
}

/// Extract typed watchlist rows from a table of cell text.
///
/// Columns 0..7 map positionally to {wkn, name, bid, ask, diff, diff%,
/// time}. Rows with fewer than 7 cells are skipped, not errors. An empty
/// reference list degrades to rows without instrument ids.
pub fn extract_rows(table: &[Vec<String>], refs: &[ReferenceSecurity]) -> Vec<WatchlistRow> {
    let mut rows = Vec::new();

    for cells in table {
        if cells.len() < MIN_COLUMNS {
            continue;
        }

        let wkn = cells[0].clone();
        let instrument_id = instrument_id_for(&wkn, refs).map(str::to_string);

        rows.push(WatchlistRow {
            wkn,
            name: cells[1].clone(),
            bid: cells[2].clone(),
            ask: cells[3].clone(),
            diff: cells[4].clone(),
            diff_percent: cells[5].clone(),
            time: cells[6].clone(),
            instrument_id,
        });
    }

    rows
}
