//! Stock analysis feed types
//!
//! Wire shapes for the aggregated news / analyst-sentiment endpoint. The
//! fixed parts of each document are plain serde structs; the parts whose key
//! sets vary per document ([`OpenRecord`], [`FinancialPerformance`]) decode
//! through the schema-free routines in [`crate::flex`].

use crate::flex::{self, FlexibleValue};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level response of the stock-analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub count: i64,
    pub data: Vec<AnalysisDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// One analysis document per tracked security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub id: String,
    pub stock_symbol: String,
    pub company_name: String,
    pub data_retrieved: String,
    pub current_stock_info: CurrentStockInfo,
    pub analyst_ratings: AnalystRatings,
    pub news_articles: Vec<NewsArticle>,
    pub financial_performance: FinancialPerformance,
    pub insider_activity: Vec<InsiderActivity>,
    pub strategic_initiatives: OpenRecord,
    pub risks: Vec<String>,
    pub market_context: OpenRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_actions: Option<Vec<AnalystAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<StoredAt>,
}

impl AnalysisDocument {
    pub fn is_price_increasing(&self) -> bool {
        self.current_stock_info.change_percent > 0.0
    }

    pub fn formatted_market_cap(&self) -> String {
        format!("${:.2}B", self.current_stock_info.market_cap_billions)
    }

    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.current_stock_info.current_price)
    }
}

/// Current price / volatility block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStockInfo {
    pub current_price: f64,
    pub currency: String,
    pub last_updated: String,
    pub change_percent: f64,
    #[serde(rename = "52_week_range")]
    pub week_range_52: WeekRange,
    pub year_to_date_change: String,
    pub one_year_change: String,
    pub market_cap_billions: f64,
    pub beta: f64,
    pub average_volume: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRange {
    pub low: f64,
    pub high: f64,
}

/// Analyst consensus block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystRatings {
    pub consensus: String,
    pub target_price: f64,
    pub median_12_month_target: f64,
    pub potential_upside_downside: String,
}

/// News article with flexible side data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub headline: String,
    pub summary: String,
    pub sentiment: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_data: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_metrics: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_movement: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_drivers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_details: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_upside_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_products: Option<Vec<String>>,
}

impl NewsArticle {
    /// Stable display identity, date + headline
    pub fn display_id(&self) -> String {
        format!("{}_{}", self.date, self.headline)
    }
}

/// Insider-activity record; upstream fills a varying subset of these
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InsiderActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_share: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_change_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Analyst rating change
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalystAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// Storage timestamp as written by the backing document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAt {
    #[serde(rename = "_seconds")]
    pub seconds: i64,
    #[serde(rename = "_nanoseconds")]
    pub nanoseconds: i64,
}

/// An object with an arbitrary key set, decoded key-by-key.
///
/// Keys whose values fail to normalize are dropped rather than failing the
/// document. Retained keys re-encode exactly, in their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenRecord(pub IndexMap<String, FlexibleValue>);

impl OpenRecord {
    pub fn get(&self, key: &str) -> Option<&FlexibleValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for OpenRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OpenRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        flex::decode_open_map(&value, "$").map(OpenRecord).map_err(D::Error::custom)
    }
}

/// Fiscal-period blocks keyed by period label.
///
/// Upstream keys these by fiscal period strings that vary by document; only
/// the recognized labels below are surfaced, each as an optional open
/// record. A label that is absent or fails to decode is simply `None`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct FinancialPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q2_2025: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fy2025: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projections: Option<OpenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projections_2028: Option<OpenRecord>,
}

impl<'de> Deserialize<'de> for FinancialPerformance {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let obj = value
            .as_object()
            .ok_or_else(|| D::Error::custom("financial_performance must be an object"))?;

        let block = |name: &str| -> Option<OpenRecord> {
            obj.get(name)
                .and_then(|v| flex::decode_open_map(v, name).ok())
                .map(OpenRecord)
        };

        Ok(FinancialPerformance {
            q2_2025: block("q2_2025"),
            fy2025: block("fy2025"),
            projections: block("projections"),
            projections_2028: block("projections_2028"),
        })
    }
}
