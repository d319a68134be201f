//! Watchlist page fetch and table parsing
//!
//! The broker exposes the watchlist only as an HTML page keyed by a cookie
//! carrying the WKN list. This service fetches the page, pulls the table
//! rows out as cell text, and hands them to [`crate::watchlist::extract_rows`]
//! for typing and the reference join.

use crate::error::{AppError, Result};
use crate::watchlist::{extract_rows, ReferenceSecurity, WatchlistRow};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

const WATCHLIST_URL: &str = "https://www.ls-tc.de/en/watchlist";
const USER_AGENT: &str = "Mozilla/5.0 (iOS) Safari";
// Site requires the disclaimer cookie before it serves the table
const DISCLAIMER_COOKIE: &str = "disclaimer=2015040809";

/// Watchlist fetcher
pub struct WatchlistService {
    client: Client,
}

impl WatchlistService {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
        }
    }

    /// Fetch the watchlist page for `wkns` and return typed rows joined
    /// against `refs`. Each call yields a fresh snapshot.
    pub async fn fetch_watchlist(
        &self,
        wkns: &[String],
        refs: &[ReferenceSecurity],
    ) -> Result<Vec<WatchlistRow>> {
        let response = self
            .client
            .get(WATCHLIST_URL)
            .header("Cookie", watchlist_cookie(wkns))
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(status.as_u16()));
        }

        let html = response.text().await?;
        let table = parse_table(&html)?;
        let rows = extract_rows(&table, refs);

        info!("Watchlist refresh: {} rows", rows.len());
        Ok(rows)
    }
}

impl Default for WatchlistService {
    fn default() -> Self {
        Self::new()
    }
}

/// Cookie header value selecting the watchlist contents
fn watchlist_cookie(wkns: &[String]) -> String {
    let list = urlencoding::encode(&wkns.join(",")).into_owned();
    format!("{}; watchlist={}", DISCLAIMER_COOKIE, list)
}

/// Pull `tbody tr` rows out of the page as cell text.
///
/// Whitespace inside a cell is collapsed. A page with no table rows at all
/// is a parse error; short or header rows are left for the extractor to
/// skip.
pub fn parse_table(html: &str) -> Result<Vec<Vec<String>>> {
    let document = Html::parse_document(html);
    let row_selector =
        Selector::parse("tbody tr").map_err(|e| AppError::Parse(e.to_string()))?;
    let cell_selector = Selector::parse("td").map_err(|e| AppError::Parse(e.to_string()))?;

    let mut table = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| {
                cell.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        table.push(cells);
    }

    if table.is_empty() {
        return Err(AppError::Parse(
            "watchlist page contained no table rows".to_string(),
        ));
    }

    debug!("Parsed {} table rows", table.len());
    Ok(table)
}
