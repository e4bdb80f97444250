//! Result sink for the trade analyzer.
//!
//! Writes one CSV row per aggregated group.

pub mod csv_report;

pub use csv_report::{CsvReport, ReportRow};
