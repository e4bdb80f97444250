//! Command-line driver for the trade analyzer.
//!
//! This crate handles:
//! - Argument parsing and usage errors
//! - File logging setup
//! - The batch pipeline: ingest, coerce, aggregate, report

pub mod args;
pub mod logging;
pub mod pipeline;

pub use args::{parse_args, usage_error, Args};
pub use logging::init_logging;
pub use pipeline::{failure_kind, run, RunOptions, RunSummary};
