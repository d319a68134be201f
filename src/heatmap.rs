//! Trade journal heatmap aggregation
//!
//! Reduces journal entries to per-day profit/loss buckets for the heatmap
//! view. The caller picks a granularity and an anchor date; the granularity
//! bounds which entries are considered and how navigation steps, but the
//! grouping key is always the calendar day.

use crate::db::sqlite::models::TradeJournalEntry;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar alignment for filtering and navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

/// Navigation direction for [`advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One day's aggregate, derived on demand and never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapBucket {
    pub date: NaiveDate,
    pub total_profit: f64,
    pub trade_count: usize,
}

/// Half-open calendar interval `[start, end)` of `granularity` containing
/// `anchor`. Weeks are ISO weeks starting Monday.
pub fn interval(granularity: Granularity, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    match granularity {
        Granularity::Day => (anchor, anchor + Days::new(1)),
        Granularity::Week => {
            let start = anchor.week(Weekday::Mon).first_day();
            (start, start + Days::new(7))
        }
        Granularity::Month => {
            let start = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1)
                .expect("first of month is always valid");
            (start, start + Months::new(1))
        }
        Granularity::Year => {
            let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1)
                .expect("first of year is always valid");
            (start, start + Months::new(12))
        }
    }
}

/// Step the anchor by exactly one unit of `granularity`.
///
/// Month and year steps use calendar-aware arithmetic, so stepping back a
/// month from a month-end date lands on the last valid day, never an
/// invalid one.
pub fn advance(anchor: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    let forward = direction == Direction::Forward;
    match granularity {
        Granularity::Day if forward => anchor + Days::new(1),
        Granularity::Day => anchor - Days::new(1),
        Granularity::Week if forward => anchor + Days::new(7),
        Granularity::Week => anchor - Days::new(7),
        Granularity::Month if forward => anchor + Months::new(1),
        Granularity::Month => anchor - Months::new(1),
        Granularity::Year if forward => anchor + Months::new(12),
        Granularity::Year => anchor - Months::new(12),
    }
}

/// Aggregate entries into per-day buckets for the window of `granularity`
/// containing `anchor`.
///
/// Entries outside the window are ignored; entries inside are grouped by
/// trade date, summing profit and counting trades. Output is sorted
/// ascending by date. Entries are only read, never mutated.
pub fn bucketize(
    entries: &[TradeJournalEntry],
    granularity: Granularity,
    anchor: NaiveDate,
) -> Vec<HeatmapBucket> {
    let (start, end) = interval(granularity, anchor);

    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        if entry.trade_date < start || entry.trade_date >= end {
            continue;
        }
        let day = days.entry(entry.trade_date).or_insert((0.0, 0));
        day.0 += entry.profit;
        day.1 += 1;
    }

    days.into_iter()
        .map(|(date, (total_profit, trade_count))| HeatmapBucket {
            date,
            total_profit,
            trade_count,
        })
        .collect()
}

/// Grand total and trade count across a window, for the footer line
pub fn period_total(buckets: &[HeatmapBucket]) -> (f64, usize) {
    buckets.iter().fold((0.0, 0), |(sum, count), b| {
        (sum + b.total_profit, count + b.trade_count)
    })
}

/// Which base color a heatmap cell takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellKind {
    Gain,
    Loss,
    Neutral,
}

/// Resolved cell color: base kind plus opacity in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellColor {
    pub kind: CellKind,
    pub opacity: f64,
}

const INTENSITY_SCALE: f64 = 1000.0;
const NEUTRAL_OPACITY: f64 = 0.2;

/// Map a day's summed profit/loss to its cell color.
///
/// Intensity is `min(|v| / 1000, 1)`; gain and loss cells share the opacity
/// curve `0.3 + 0.7 * intensity`, a zero sum is a fixed neutral gray.
pub fn cell_color(total_profit: f64) -> CellColor {
    if total_profit == 0.0 {
        return CellColor {
            kind: CellKind::Neutral,
            opacity: NEUTRAL_OPACITY,
        };
    }

    let intensity = (total_profit.abs() / INTENSITY_SCALE).min(1.0);
    let kind = if total_profit > 0.0 {
        CellKind::Gain
    } else {
        CellKind::Loss
    };

    CellColor {
        kind,
        opacity: 0.3 + intensity * 0.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::models::TradeType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(profit: f64, trade_date: NaiveDate) -> TradeJournalEntry {
        TradeJournalEntry::new(
            "Test AG",
            None,
            profit,
            TradeType::from_amount(profit),
            trade_date,
        )
    }

    #[test]
    fn test_week_bucketize_groups_by_day() {
        // 2024-01-01 is a Monday; the whole fixture sits in one ISO week
        let entries = vec![
            entry(100.0, date(2024, 1, 1)),
            entry(-30.0, date(2024, 1, 1)),
            entry(5.0, date(2024, 1, 2)),
        ];

        let buckets = bucketize(&entries, Granularity::Week, date(2024, 1, 3));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, date(2024, 1, 1));
        assert_eq!(buckets[0].total_profit, 70.0);
        assert_eq!(buckets[0].trade_count, 2);
        assert_eq!(buckets[1].date, date(2024, 1, 2));
        assert_eq!(buckets[1].total_profit, 5.0);
        assert_eq!(buckets[1].trade_count, 1);
    }

    #[test]
    fn test_bucketize_filters_to_window() {
        let entries = vec![
            entry(10.0, date(2024, 1, 15)),
            entry(20.0, date(2024, 2, 1)), // outside January
        ];

        let buckets = bucketize(&entries, Granularity::Month, date(2024, 1, 7));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, date(2024, 1, 15));
    }

    #[test]
    fn test_day_window_is_single_day() {
        let entries = vec![
            entry(10.0, date(2024, 1, 15)),
            entry(20.0, date(2024, 1, 16)),
        ];

        let buckets = bucketize(&entries, Granularity::Day, date(2024, 1, 15));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_profit, 10.0);
    }

    #[test]
    fn test_year_window_spans_january_to_december() {
        let entries = vec![
            entry(1.0, date(2024, 1, 1)),
            entry(2.0, date(2024, 12, 31)),
            entry(4.0, date(2025, 1, 1)),
        ];

        let buckets = bucketize(&entries, Granularity::Year, date(2024, 6, 15));
        assert_eq!(buckets.len(), 2);
        assert_eq!(period_total(&buckets), (3.0, 2));
    }

    #[test]
    fn test_week_interval_starts_monday() {
        // 2024-01-03 is a Wednesday
        let (start, end) = interval(Granularity::Week, date(2024, 1, 3));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 1, 8));
    }

    #[test]
    fn test_advance_month_clamps_month_end() {
        let stepped = advance(date(2024, 1, 31), Granularity::Month, Direction::Forward);
        assert_eq!(stepped, date(2024, 2, 29));

        let back = advance(date(2024, 3, 31), Granularity::Month, Direction::Backward);
        assert_eq!(back, date(2024, 2, 29));
    }

    #[test]
    fn test_advance_year_handles_leap_day() {
        let stepped = advance(date(2024, 2, 29), Granularity::Year, Direction::Forward);
        assert_eq!(stepped, date(2025, 2, 28));
    }

    #[test]
    fn test_advance_day_and_week() {
        assert_eq!(
            advance(date(2024, 1, 1), Granularity::Day, Direction::Backward),
            date(2023, 12, 31)
        );
        assert_eq!(
            advance(date(2024, 1, 1), Granularity::Week, Direction::Forward),
            date(2024, 1, 8)
        );
    }

    #[test]
    fn test_cell_color_clamps_and_mirrors() {
        let gain = cell_color(2000.0);
        let loss = cell_color(-2000.0);

        assert_eq!(gain.kind, CellKind::Gain);
        assert_eq!(loss.kind, CellKind::Loss);
        // both clamp to max intensity
        assert!((gain.opacity - 1.0).abs() < 1e-9);
        assert_eq!(loss.opacity, gain.opacity);
    }

    #[test]
    fn test_cell_color_zero_is_neutral() {
        let neutral = cell_color(0.0);
        assert_eq!(neutral.kind, CellKind::Neutral);
        assert_eq!(neutral.opacity, NEUTRAL_OPACITY);
    }

    #[test]
    fn test_cell_color_midrange() {
        let c = cell_color(500.0);
        assert_eq!(c.kind, CellKind::Gain);
        assert!((c.opacity - 0.65).abs() < 1e-9);
    }
}
