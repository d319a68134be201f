//! TradePro Core
//!
//! Data backbone for the TradePro stock-tracking app: watchlist scraping
//! and extraction, chart series selection, schema-free normalization of the
//! analysis feed, and the SQLite-backed trade journal with its heatmap
//! aggregates. Everything UI-facing consumes the typed snapshots and pure
//! functions exposed here.

pub mod analysis;
pub mod chart;
pub mod db;
pub mod error;
pub mod flex;
pub mod heatmap;
pub mod services;
pub mod state;
pub mod watchlist;

pub use error::{AppError, ErrorResponse, Result};
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for the application shell
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradepro_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
