//! Aggregation engine for the trade analyzer.
//!
//! This crate handles:
//! - Grouping trades by correlation id
//! - Summing group values and counting observed trades
//! - Classifying each group as Accepted, Pending or Rejected
//! - Emitting results in correlation id order

pub mod engine;

pub use engine::{aggregate, aggregate_with, AggregationEngine, AggregationStats};
