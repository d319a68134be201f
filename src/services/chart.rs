//! Chart data fetch

use crate::chart::ChartPayload;
use crate::error::{AppError, Result};
use reqwest::Client;
use tracing::info;

const CHART_URL: &str = "https://www.ls-tc.de/_rpc/json/instrument/chart/dataForInstrument";

/// Chart payload fetcher
pub struct ChartService {
    client: Client,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            client: super::http_client(),
        }
    }

    /// Fetch the raw chart payload for an instrument
    pub async fn fetch_chart(&self, instrument_id: &str) -> Result<ChartPayload> {
        let response = self
            .client
            .get(format!("{}?instrumentId={}", CHART_URL, instrument_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: ChartPayload = serde_json::from_str(&body).map_err(|e| {
            AppError::decode(format!("chart payload for {}", instrument_id), e.to_string())
        })?;

        info!(
            "Chart payload for {}: intraday={}, history={}",
            instrument_id,
            payload.series.intraday.is_some(),
            payload.series.history.is_some()
        );
        Ok(payload)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
