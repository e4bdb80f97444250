//! Numeric coercion of extracted records.

use trade_core::{RawTrade, Result, TradeRecord};

/// Coerce every record to a typed trade.
///
/// Stops at the first malformed record; no partial result is returned.
pub fn coerce_records(records: &[TradeRecord]) -> Result<Vec<RawTrade>> {
    records.iter().map(RawTrade::try_from).collect()
}
