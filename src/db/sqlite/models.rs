//! SQLite data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trade direction label, redundant with the sign of the amount but kept
/// for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Profit,
    Loss,
}

impl TradeType {
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TradeType::Profit
        } else {
            TradeType::Loss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Profit => "Profit",
            TradeType::Loss => "Loss",
        }
    }
}

impl std::str::FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Profit" => Ok(TradeType::Profit),
            "Loss" => Ok(TradeType::Loss),
            other => Err(format!("unknown trade type: {}", other)),
        }
    }
}

/// A trade logged in the personal journal.
///
/// `trade_date` is the user-picked calendar day of the trade and is
/// independent of `created_at`, the moment the entry was saved. Entries are
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeJournalEntry {
    pub id: Uuid,
    pub stock_name: String,
    pub instrument_id: Option<String>,
    /// Signed profit/loss, positive = profit
    pub profit: f64,
    pub trade_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub trade_type: TradeType,
}

impl TradeJournalEntry {
    /// Build a fresh entry from a user save action. The sign of `profit`
    /// is forced to agree with `trade_type`.
    pub fn new(
        stock_name: impl Into<String>,
        instrument_id: Option<String>,
        amount: f64,
        trade_type: TradeType,
        trade_date: NaiveDate,
    ) -> Self {
        let magnitude = amount.abs();
        let profit = match trade_type {
            TradeType::Profit => magnitude,
            TradeType::Loss => -magnitude,
        };

        TradeJournalEntry {
            id: Uuid::new_v4(),
            stock_name: stock_name.into(),
            instrument_id,
            profit,
            trade_date,
            created_at: Utc::now(),
            trade_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_type_from_amount() {
        assert_eq!(TradeType::from_amount(10.0), TradeType::Profit);
        assert_eq!(TradeType::from_amount(0.0), TradeType::Profit);
        assert_eq!(TradeType::from_amount(-0.5), TradeType::Loss);
    }

    #[test]
    fn test_new_entry_sign_follows_trade_type() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let entry = TradeJournalEntry::new("Tesla Inc.", None, 250.0, TradeType::Loss, date);
        assert_eq!(entry.profit, -250.0);
        assert_eq!(entry.trade_type, TradeType::Loss);
        assert_eq!(entry.trade_date, date);
    }

    #[test]
    fn test_trade_type_round_trip() {
        assert_eq!("Profit".parse::<TradeType>().unwrap(), TradeType::Profit);
        assert_eq!("Loss".parse::<TradeType>().unwrap(), TradeType::Loss);
        assert!("Hold".parse::<TradeType>().is_err());
    }
}
