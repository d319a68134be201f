//! Stock analysis feed fetch

use crate::analysis::{AnalysisDocument, AnalysisResponse};
use crate::error::{AppError, Result};
use reqwest::Client;
use tracing::info;

const DEFAULT_BASE_URL: &str = "https://us-central1-tradepro-81292.cloudfunctions.net/api";

/// Analysis feed fetcher
pub struct AnalysisService {
    client: Client,
    base_url: String,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Fetch all analysis documents
    pub async fn fetch_analysis(&self) -> Result<AnalysisResponse> {
        let response = self
            .client
            .get(format!("{}/stock-analysis", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: AnalysisResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::decode("stock-analysis response", e.to_string()))?;

        info!("Fetched {} analysis documents", parsed.data.len());
        Ok(parsed)
    }

    /// Fetch the document for one symbol.
    ///
    /// The feed has no per-symbol endpoint, so this fetches the full
    /// response and filters client-side.
    pub async fn fetch_document(&self, symbol: &str) -> Result<Option<AnalysisDocument>> {
        let response = self.fetch_analysis().await?;
        Ok(response.data.into_iter().find(|d| d.stock_symbol == symbol))
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new()
    }
}
