//! Network fetch services
//!
//! Thin async collaborators between the upstream data sources and the core
//! extraction/normalization logic. Each service owns its HTTP client and
//! decodes into the typed domain shapes; retry and scheduling policy belong
//! to the caller.

pub mod analysis;
pub mod chart;
pub mod watchlist;

pub use analysis::AnalysisService;
pub use chart::ChartService;
pub use watchlist::WatchlistService;

use reqwest::Client;
use std::time::Duration;

/// HTTP client with the shared request timeout
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}
