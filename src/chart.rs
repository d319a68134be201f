//! Chart payload types and series selection
//!
//! The charting endpoint returns two named series, "intraday" and
//! "history", as raw `[timestamp-ms, price]` tuples. This module keeps the
//! wire shape bit-exact with upstream and exposes the decoded, sorted
//! coordinate sequence for a requested time period, plus the pure price
//! statistics the detail view renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level chart response for an instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    pub info: ChartInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    pub series: SeriesSet,
}

/// Chart metadata block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInfo {
    pub isin: String,
    #[serde(rename = "chartType")]
    pub chart_type: String,
    #[serde(rename = "textMaxValue")]
    pub text_max_value: String,
    #[serde(rename = "textMinValue")]
    pub text_min_value: String,
    pub plotlines: Vec<Plotline>,
    #[serde(rename = "maxRange", skip_serializing_if = "Option::is_none")]
    pub max_range: Option<i64>,
}

/// Labeled horizontal reference level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plotline {
    pub label: String,
    pub value: f64,
    pub align: String,
    pub y: i64,
    pub id: String,
    pub color: String,
}

/// The two optional named series of a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intraday: Option<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<ChartSeries>,
}

/// One raw series: loosely-typed coordinate tuples plus display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub id: String,
    pub data: Vec<Vec<f64>>,
    pub timeline: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "dataGrouping", skip_serializing_if = "Option::is_none")]
    pub data_grouping: Option<DataGrouping>,
}

/// Grouping hint passed through to the renderer, not interpreted here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataGrouping {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximation: Option<String>,
}

/// Requested chart time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTimePeriod {
    Intraday,
    OneMonth,
    SixMonths,
}

impl ChartTimePeriod {
    pub const ALL: [ChartTimePeriod; 3] = [
        ChartTimePeriod::Intraday,
        ChartTimePeriod::OneMonth,
        ChartTimePeriod::SixMonths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartTimePeriod::Intraday => "intraday",
            ChartTimePeriod::OneMonth => "1M",
            ChartTimePeriod::SixMonths => "6M",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChartTimePeriod::Intraday => "Intraday",
            ChartTimePeriod::OneMonth => "1 Month",
            ChartTimePeriod::SixMonths => "6 Months",
        }
    }
}

/// A decoded chart coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Select and decode the series backing `period`.
///
/// Intraday maps to the "intraday" series; one-month and six-months both
/// map to "history" — upstream ships no separate one-month series, a data
/// source limitation preserved here. Tuples with fewer than two elements
/// are skipped, and a missing series yields an empty sequence so the caller
/// can render an explicit "unavailable" state. The result is sorted
/// ascending by timestamp.
pub fn select_series(payload: &ChartPayload, period: ChartTimePeriod) -> Vec<ChartSeriesPoint> {
    let series = match period {
        ChartTimePeriod::Intraday => payload.series.intraday.as_ref(),
        ChartTimePeriod::OneMonth | ChartTimePeriod::SixMonths => payload.series.history.as_ref(),
    };

    let Some(series) = series else {
        return Vec::new();
    };

    let mut points: Vec<ChartSeriesPoint> = series
        .data
        .iter()
        .filter(|tuple| tuple.len() >= 2)
        .filter_map(|tuple| {
            let timestamp = DateTime::from_timestamp_millis(tuple[0] as i64)?;
            Some(ChartSeriesPoint {
                timestamp,
                price: tuple[1],
            })
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);
    points
}

/// Lowest price in the sequence
pub fn min_price(points: &[ChartSeriesPoint]) -> Option<f64> {
    points.iter().map(|p| p.price).reduce(f64::min)
}

/// Highest price in the sequence
pub fn max_price(points: &[ChartSeriesPoint]) -> Option<f64> {
    points.iter().map(|p| p.price).reduce(f64::max)
}

/// Spread between highest and lowest price
pub fn price_range(points: &[ChartSeriesPoint]) -> Option<f64> {
    Some(max_price(points)? - min_price(points)?)
}

pub fn point_count(points: &[ChartSeriesPoint]) -> usize {
    points.len()
}

pub fn first_price(points: &[ChartSeriesPoint]) -> Option<f64> {
    points.first().map(|p| p.price)
}

pub fn last_price(points: &[ChartSeriesPoint]) -> Option<f64> {
    points.last().map(|p| p.price)
}

/// Last price minus first price; `None` for an empty sequence
pub fn day_change(points: &[ChartSeriesPoint]) -> Option<f64> {
    Some(last_price(points)? - first_price(points)?)
}

/// Day change as a percentage of the first price.
///
/// `None` when the sequence is empty or the first price is zero, so the
/// caller never divides by zero.
pub fn day_change_percent(points: &[ChartSeriesPoint]) -> Option<f64> {
    let first = first_price(points)?;
    if first == 0.0 {
        return None;
    }
    Some(day_change(points)? / first * 100.0)
}
