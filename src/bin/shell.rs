//! Headless application shell
//!
//! Wires the services and state together without a UI: refreshes the
//! watchlist, pulls the chart for the first resolvable instrument and
//! prints the derived stats. Useful for smoke-testing the data path.

use tradepro_core::chart::{self, ChartTimePeriod};
use tradepro_core::services::{ChartService, WatchlistService};
use tradepro_core::{AppState, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tradepro_core::init_tracing();

    let data_dir = dirs_fallback();
    let state = AppState::new(&data_dir)?;

    let refs = state.reference_snapshot();
    let wkns: Vec<String> = refs.iter().map(|r| r.wkn.clone()).collect();

    let watchlist = WatchlistService::new();
    let rows = watchlist.fetch_watchlist(&wkns, &refs).await?;
    for row in &rows {
        println!(
            "{:8} {:28} bid {:>10} ask {:>10} {:>8} {:>8}",
            row.wkn, row.name, row.bid, row.ask, row.diff, row.diff_percent
        );
    }
    state.set_watchlist(rows);

    let Some(instrument_id) = state
        .watchlist_snapshot()
        .iter()
        .find_map(|r| r.instrument_id.clone())
    else {
        println!("No instrument id resolvable from the watchlist");
        return Ok(());
    };

    let charts = ChartService::new();
    let payload = charts.fetch_chart(&instrument_id).await?;
    let points = chart::select_series(&payload, ChartTimePeriod::Intraday);
    println!(
        "{}: {} intraday points, range {:?}, change {:?} ({:?}%)",
        payload.info.isin,
        chart::point_count(&points),
        chart::price_range(&points),
        chart::day_change(&points),
        chart::day_change_percent(&points),
    );

    Ok(())
}

fn dirs_fallback() -> std::path::PathBuf {
    std::env::var_os("TRADEPRO_DATA_DIR")
        .map(Into::into)
        .unwrap_or_else(|| std::path::PathBuf::from(".tradepro"))
}
