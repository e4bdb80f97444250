//! Correlation group aggregation.
//!
//! Trades are folded into one accumulator per correlation id in a single
//! pass, then every group is classified and emitted in ascending string
//! order of its correlation id.

use std::collections::BTreeMap;

use trade_core::config::AggregationConfig;
use trade_core::{
    field, AggregatedGroup, Amount, Diagnostics, Error, RawTrade, Result, TradeState,
};

/// Counters describing one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Trades folded into groups.
    pub total_trades: u64,
    /// Distinct correlation ids.
    pub groups: u64,
    pub accepted: u64,
    pub pending: u64,
    pub rejected: u64,
    /// Later rows that disagreed with their group's first row.
    pub inconsistent_rows: u64,
}

impl AggregationStats {
    fn record(&mut self, state: TradeState) {
        self.groups += 1;
        match state {
            TradeState::Accepted => self.accepted += 1,
            TradeState::Pending => self.pending += 1,
            TradeState::Rejected => self.rejected += 1,
        }
    }
}

/// A group that is still receiving trades.
#[derive(Debug, Clone)]
struct GroupInProgress {
    /// Expected trade count from the first row.
    number_of_trades: u32,
    /// Limit from the first row.
    limit: Amount,
    /// Running total, wide enough that row order never matters.
    summed_value: i128,
    observed: u64,
}

impl GroupInProgress {
    fn new(first: &RawTrade) -> Self {
        Self {
            number_of_trades: first.number_of_trades,
            limit: first.limit,
            summed_value: 0,
            observed: 0,
        }
    }

    fn add_trade(&mut self, trade: &RawTrade) {
        self.summed_value += i128::from(trade.value);
        self.observed += 1;
    }

    fn state(&self) -> TradeState {
        TradeState::classify(self.observed, self.number_of_trades, self.summed_value, self.limit)
    }

    fn to_group(&self, correlation_id: &str) -> Result<AggregatedGroup> {
        let value = Amount::try_from(self.summed_value).map_err(|_| {
            Error::input_format(
                format!("correlation {}", correlation_id),
                field::VALUE,
                format!("summed value {} does not fit in 64 bits", self.summed_value),
            )
        })?;
        Ok(AggregatedGroup {
            correlation_id: correlation_id.to_string(),
            number_of_trades: self.number_of_trades,
            limit: self.limit,
            value,
            observed_trades: self.observed,
            state: self.state(),
        })
    }
}

/// Groups trades by correlation id and classifies each group.
pub struct AggregationEngine<'d> {
    /// Groups keyed by correlation id. Ordered so that finalization is
    /// already sorted.
    groups: BTreeMap<String, GroupInProgress>,
    strict_group_consistency: bool,
    total_trades: u64,
    inconsistent_rows: u64,
    diagnostics: &'d dyn Diagnostics,
}

impl<'d> AggregationEngine<'d> {
    /// Create an engine with default options.
    pub fn new(diagnostics: &'d dyn Diagnostics) -> Self {
        Self::with_options(&AggregationConfig::default(), diagnostics)
    }

    /// Create an engine from configuration.
    pub fn with_options(options: &AggregationConfig, diagnostics: &'d dyn Diagnostics) -> Self {
        Self {
            groups: BTreeMap::new(),
            strict_group_consistency: options.strict_group_consistency,
            total_trades: 0,
            inconsistent_rows: 0,
            diagnostics,
        }
    }

    /// Fold one trade into its group.
    pub fn add_trade(&mut self, trade: &RawTrade) -> Result<()> {
        if let Some(group) = self.groups.get(&trade.correlation_id) {
            if group.number_of_trades != trade.number_of_trades || group.limit != trade.limit {
                let message = format!(
                    "trade {} declares NumberOfTrades={} Limit={}, group uses NumberOfTrades={} Limit={}",
                    trade.trade_id,
                    trade.number_of_trades,
                    trade.limit,
                    group.number_of_trades,
                    group.limit
                );
                if self.strict_group_consistency {
                    return Err(Error::input_format(
                        format!("correlation {}", trade.correlation_id),
                        field::NUMBER_OF_TRADES,
                        message,
                    ));
                }
                self.inconsistent_rows += 1;
                self.diagnostics.warn(&format!(
                    "Inconsistent rows for correlation ID {}: {}",
                    trade.correlation_id, message
                ));
            }
        }

        let group = self
            .groups
            .entry(trade.correlation_id.clone())
            .or_insert_with(|| GroupInProgress::new(trade));
        group.add_trade(trade);
        self.total_trades += 1;
        Ok(())
    }

    /// Fold many trades, stopping at the first error.
    pub fn add_trades(&mut self, trades: &[RawTrade]) -> Result<()> {
        for trade in trades {
            self.add_trade(trade)?;
        }
        Ok(())
    }

    /// Number of distinct correlation ids seen so far.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Counters for the groups accumulated so far.
    pub fn stats(&self) -> AggregationStats {
        let mut stats = AggregationStats {
            total_trades: self.total_trades,
            inconsistent_rows: self.inconsistent_rows,
            ..AggregationStats::default()
        };
        for group in self.groups.values() {
            stats.record(group.state());
        }
        stats
    }

    /// Classify every group and return them sorted by correlation id.
    ///
    /// Fails if a group's total does not fit in an [`Amount`].
    pub fn finalize(self) -> Result<Vec<AggregatedGroup>> {
        let mut results = Vec::with_capacity(self.groups.len());

        for (correlation_id, in_progress) in &self.groups {
            self.diagnostics.debug(&format!(
                "Finding and aggregating trades for correlation ID: {}",
                correlation_id
            ));
            let group = in_progress.to_group(correlation_id)?;
            let verb = match group.state {
                TradeState::Accepted => "accepted",
                TradeState::Pending => "pending",
                TradeState::Rejected => "rejected",
            };
            self.diagnostics.info(&format!(
                "Trades {} for correlation ID: {}",
                verb, correlation_id
            ));
            results.push(group);
        }

        Ok(results)
    }
}

/// Aggregate typed trades with default options.
pub fn aggregate(trades: &[RawTrade], diagnostics: &dyn Diagnostics) -> Result<Vec<AggregatedGroup>> {
    aggregate_with(trades, &AggregationConfig::default(), diagnostics)
}

/// Aggregate typed trades.
pub fn aggregate_with(
    trades: &[RawTrade],
    options: &AggregationConfig,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<AggregatedGroup>> {
    let mut engine = AggregationEngine::with_options(options, diagnostics);
    engine.add_trades(trades)?;
    engine.finalize()
}
