//! Configuration structures for the trade analyzer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input document layout.
    pub ingestion: IngestionConfig,
    /// Aggregation behaviour.
    pub aggregation: AggregationConfig,
    /// Result sink.
    pub output: OutputConfig,
    /// Log file and level.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a JSON configuration. Missing sections take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject configurations that cannot work.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("ingestion.trade_tag", &self.ingestion.trade_tag),
            ("ingestion.correlation_attr", &self.ingestion.correlation_attr),
            ("ingestion.trade_count_attr", &self.ingestion.trade_count_attr),
            ("ingestion.limit_attr", &self.ingestion.limit_attr),
            ("ingestion.trade_id_attr", &self.ingestion.trade_id_attr),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{} must not be empty", key)));
            }
        }
        self.output.delimiter_byte()?;
        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config("output.path must not be empty"));
        }
        Ok(())
    }
}

/// Names of the element and attributes trades are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Element name of a trade record.
    pub trade_tag: String,
    /// Attribute holding the correlation id.
    pub correlation_attr: String,
    /// Attribute holding the expected number of trades.
    pub trade_count_attr: String,
    /// Attribute holding the group limit.
    pub limit_attr: String,
    /// Attribute holding the trade id.
    pub trade_id_attr: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            trade_tag: "Trade".to_string(),
            correlation_attr: "CorrelationId".to_string(),
            trade_count_attr: "NumberOfTrades".to_string(),
            limit_attr: "Limit".to_string(),
            trade_id_attr: "TradeID".to_string(),
        }
    }
}

/// Aggregation engine options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Fail when rows of one group disagree on NumberOfTrades or Limit.
    /// When off, the first row wins and a warning is logged.
    pub strict_group_consistency: bool,
}

/// CSV output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file path.
    pub path: PathBuf,
    /// Field delimiter.
    pub delimiter: char,
}

impl OutputConfig {
    /// The delimiter as a byte. Must be ASCII, and not a quote or line break.
    pub fn delimiter_byte(&self) -> Result<u8> {
        let delimiter = self.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
            return Err(Error::config(format!(
                "output.delimiter must be a single ASCII character other than a quote or line break, got {:?}",
                delimiter
            )));
        }
        Ok(delimiter as u8)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("results.csv"),
            delimiter: ',',
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file, appended to.
    pub file: PathBuf,
    /// Default filter directive when RUST_LOG is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("server.log"),
            level: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ingestion.trade_tag, "Trade");
        assert_eq!(config.output.path, PathBuf::from("results.csv"));
        assert_eq!(config.output.delimiter, ',');
        assert_eq!(config.logging.file, PathBuf::from("server.log"));
        assert!(!config.aggregation.strict_group_consistency);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(
            r#"{ "aggregation": { "strict_group_consistency": true },
                 "output": { "delimiter": ";" } }"#,
        )
        .unwrap();
        assert!(config.aggregation.strict_group_consistency);
        assert_eq!(config.output.delimiter, ';');
        assert_eq!(config.output.path, PathBuf::from("results.csv"));
        assert_eq!(config.ingestion.limit_attr, "Limit");
    }

    #[test]
    fn test_rejects_empty_tag() {
        let err = Config::from_json_str(r#"{ "ingestion": { "trade_tag": "" } }"#).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let err = Config::from_json_str(r#"{ "output": { "delimiter": "é" } }"#).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_rejects_quote_and_line_break_delimiters() {
        for delimiter in ['"', '\n', '\r'] {
            let mut config = Config::default();
            config.output.delimiter = delimiter;
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), "ConfigError");
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.kind(), "JsonError");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "logging": { "level": "info" } }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, PathBuf::from("server.log"));
    }
}
