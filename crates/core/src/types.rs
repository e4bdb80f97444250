//! Core data types for the trade analyzer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade or limit value. Integer amounts only.
pub type Amount = i64;

/// Field names as they appear in the source markup.
pub mod field {
    pub const CORRELATION_ID: &str = "CorrelationId";
    pub const NUMBER_OF_TRADES: &str = "NumberOfTrades";
    pub const LIMIT: &str = "Limit";
    pub const TRADE_ID: &str = "TradeID";
    pub const VALUE: &str = "Value";
}

/// A trade row exactly as extracted from the source document.
///
/// All fields are kept as text; [`RawTrade::try_from`] performs the
/// validated numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub correlation_id: String,
    pub number_of_trades: String,
    pub limit: String,
    pub value: String,
    pub trade_id: String,
}

impl TradeRecord {
    /// Human readable label used in error messages.
    pub fn label(&self) -> String {
        format!(
            "trade {} (correlation {})",
            self.trade_id, self.correlation_id
        )
    }
}

/// A single typed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrade {
    /// Group key. Compared as a string, never as a number.
    pub correlation_id: String,
    /// Expected number of trades in the group.
    pub number_of_trades: u32,
    /// Maximum summed value allowed for the group.
    pub limit: Amount,
    /// Value of this trade.
    pub value: Amount,
    /// Unique trade identifier, carried for traceability.
    pub trade_id: String,
}

impl RawTrade {
    /// Create a trade from already typed fields.
    pub fn new(
        correlation_id: impl Into<String>,
        number_of_trades: u32,
        limit: Amount,
        value: Amount,
        trade_id: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            number_of_trades,
            limit,
            value,
            trade_id: trade_id.into(),
        }
    }
}

/// Parse a numeric field, trimming surrounding whitespace.
fn parse_field<T>(record: &TradeRecord, name: &str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.trim().parse::<T>().map_err(|e| {
        Error::input_format(record.label(), name, format!("{:?}: {}", text, e))
    })
}

impl TryFrom<&TradeRecord> for RawTrade {
    type Error = Error;

    fn try_from(record: &TradeRecord) -> Result<Self> {
        Ok(Self {
            correlation_id: record.correlation_id.clone(),
            number_of_trades: parse_field(record, field::NUMBER_OF_TRADES, &record.number_of_trades)?,
            limit: parse_field(record, field::LIMIT, &record.limit)?,
            value: parse_field(record, field::VALUE, &record.value)?,
            trade_id: record.trade_id.clone(),
        })
    }
}

/// Verdict for a correlation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeState {
    /// All expected trades seen and within the limit.
    Accepted,
    /// Some trades still outstanding, within the limit so far.
    Pending,
    /// Too many trades, or over the limit.
    Rejected,
}

impl TradeState {
    /// Classify a group.
    ///
    /// Evaluated in order: complete and within limit is Accepted, incomplete
    /// and within limit is Pending, anything else is Rejected.
    ///
    /// `summed` is taken as `i128` so that totals of any number of `Amount`s
    /// compare exactly against the limit.
    pub fn classify(observed: u64, expected: u32, summed: i128, limit: Amount) -> Self {
        let expected = u64::from(expected);
        let within_limit = summed <= i128::from(limit);
        if observed == expected && within_limit {
            TradeState::Accepted
        } else if observed < expected && within_limit {
            TradeState::Pending
        } else {
            TradeState::Rejected
        }
    }

    /// Name as written to the report.
    pub fn as_str(self) -> &'static str {
        match self {
            TradeState::Accepted => "Accepted",
            TradeState::Pending => "Pending",
            TradeState::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for TradeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated verdict for one correlation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedGroup {
    pub correlation_id: String,
    /// Expected trade count, from the group's first row.
    pub number_of_trades: u32,
    /// Limit, from the group's first row.
    pub limit: Amount,
    /// Sum of all trade values in the group.
    pub value: Amount,
    /// Number of trades actually observed.
    pub observed_trades: u64,
    pub state: TradeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &str) -> TradeRecord {
        TradeRecord {
            correlation_id: "002".to_string(),
            number_of_trades: "1".to_string(),
            limit: "1000".to_string(),
            value: value.to_string(),
            trade_id: "B2".to_string(),
        }
    }

    #[test]
    fn test_coerce_record() {
        let trade = RawTrade::try_from(&record("1170")).unwrap();
        assert_eq!(trade, RawTrade::new("002", 1, 1000, 1170, "B2"));
    }

    #[test]
    fn test_coerce_keeps_correlation_id_text() {
        let trade = RawTrade::try_from(&record("5")).unwrap();
        assert_eq!(trade.correlation_id, "002");
    }

    #[test]
    fn test_coerce_trims_whitespace() {
        let trade = RawTrade::try_from(&record("\n    700  ")).unwrap();
        assert_eq!(trade.value, 700);
    }

    #[test]
    fn test_coerce_rejects_non_numeric_value() {
        let err = RawTrade::try_from(&record("abc")).unwrap_err();
        match err {
            Error::InputFormat { record, field, .. } => {
                assert_eq!(field, "Value");
                assert!(record.contains("B2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_coerce_rejects_decimal_value() {
        let err = RawTrade::try_from(&record("700.5")).unwrap_err();
        assert_eq!(err.kind(), "InputFormatError");
    }

    #[test]
    fn test_coerce_rejects_negative_trade_count() {
        let mut rec = record("10");
        rec.number_of_trades = "-1".to_string();
        let err = RawTrade::try_from(&rec).unwrap_err();
        assert_eq!(err.kind(), "InputFormatError");
    }

    #[test]
    fn test_classify_table() {
        // observed vs expected, crossed with summed vs limit
        assert_eq!(TradeState::classify(1, 2, 100, 500), TradeState::Pending);
        assert_eq!(TradeState::classify(1, 2, 600, 500), TradeState::Rejected);
        assert_eq!(TradeState::classify(2, 2, 500, 500), TradeState::Accepted);
        assert_eq!(TradeState::classify(2, 2, 501, 500), TradeState::Rejected);
        assert_eq!(TradeState::classify(3, 2, 100, 500), TradeState::Rejected);
        assert_eq!(TradeState::classify(3, 2, 600, 500), TradeState::Rejected);
    }

    #[test]
    fn test_classify_total_beyond_amount_range() {
        let over = i128::from(Amount::MAX) + 1;
        assert_eq!(TradeState::classify(2, 2, over, Amount::MAX), TradeState::Rejected);
        let under = i128::from(Amount::MIN) - 1;
        assert_eq!(TradeState::classify(2, 2, under, Amount::MIN), TradeState::Accepted);
    }

    #[test]
    fn test_classify_zero_expected() {
        assert_eq!(TradeState::classify(1, 0, 0, 10), TradeState::Rejected);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TradeState::Accepted.to_string(), "Accepted");
        assert_eq!(TradeState::Pending.to_string(), "Pending");
        assert_eq!(TradeState::Rejected.to_string(), "Rejected");
    }
}
