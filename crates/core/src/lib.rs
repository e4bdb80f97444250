//! Core types and configuration for the trade analyzer.
//!
//! This crate provides shared types used across all other crates:
//! - Trade records and aggregated verdicts
//! - Configuration structures
//! - Common error types
//! - The injected diagnostics sink

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod types;

pub use config::Config;
pub use diagnostics::{Diagnostics, LogLevel, MemoryDiagnostics, NullDiagnostics, TracingDiagnostics};
pub use error::{Error, Result};
pub use types::*;
