//! Batch pipeline: XML in, CSV out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use trade_core::{Config, Diagnostics, Error};
use trade_engine::{AggregationEngine, AggregationStats};
use trade_ingestion::{coerce_records, XmlIngestor};
use trade_report::CsvReport;

use crate::args::Args;

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub config: Config,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            input: input.into(),
            config,
        }
    }

    /// Resolve the configuration named on the command line.
    pub fn from_args(args: &Args) -> trade_core::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(output) = &args.output {
            config.output.path = output.clone();
        }
        config.validate()?;
        Ok(Self::new(args.input.clone(), config))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: AggregationStats,
}

/// Run the whole batch.
///
/// All records are read and validated before aggregation, and the report is
/// only written once every group has been classified.
pub fn run(options: &RunOptions, diagnostics: &dyn Diagnostics) -> Result<RunSummary> {
    let config = &options.config;

    let records = XmlIngestor::new(config.ingestion.clone())
        .ingest_file(&options.input, diagnostics)
        .with_context(|| format!("reading trades from {}", options.input.display()))?;

    diagnostics.info("Converting trade records to typed trades ...");
    let trades = coerce_records(&records)?;

    let mut engine = AggregationEngine::with_options(&config.aggregation, diagnostics);
    engine.add_trades(&trades)?;
    let stats = engine.stats();
    let groups = engine.finalize()?;

    CsvReport::new(config.output.clone())
        .write_file(&config.output.path, &groups, diagnostics)
        .with_context(|| format!("writing report to {}", config.output.path.display()))?;

    Ok(RunSummary {
        output: config.output.path.clone(),
        stats,
    })
}

/// Classification of a failed run for the final log line.
pub fn failure_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<Error>()
        .map(Error::kind)
        .unwrap_or("UnexpectedError")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_args;

    #[test]
    fn test_options_default_config() {
        let args = parse_args(["analyze-trades", "trades.xml"]).unwrap();
        let options = RunOptions::from_args(&args).unwrap();
        assert_eq!(options.input, PathBuf::from("trades.xml"));
        assert_eq!(options.config.output.path, PathBuf::from("results.csv"));
    }

    #[test]
    fn test_output_flag_overrides_config() {
        let args = parse_args(["analyze-trades", "trades.xml", "--output", "out/r.csv"]).unwrap();
        let options = RunOptions::from_args(&args).unwrap();
        assert_eq!(options.config.output.path, PathBuf::from("out/r.csv"));
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse_args(["analyze-trades", "trades.xml", "--config", "/nonexistent/c.json"])
            .unwrap();
        let err = RunOptions::from_args(&args).unwrap_err();
        assert_eq!(err.kind(), "IoError");
    }

    #[test]
    fn test_failure_kind() {
        let typed = anyhow::Error::new(Error::parse("bad xml")).context("reading trades");
        assert_eq!(failure_kind(&typed), "ParseError");

        let untyped = anyhow::anyhow!("something else");
        assert_eq!(failure_kind(&untyped), "UnexpectedError");
    }
}
