//! CSV report writer.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use trade_core::config::OutputConfig;
use trade_core::{AggregatedGroup, Diagnostics, Error, Result, TradeState};

/// One report line. Value and Limit are not part of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow<'a> {
    #[serde(rename = "CorrelationID")]
    pub correlation_id: &'a str,
    #[serde(rename = "NumberOfTrades")]
    pub number_of_trades: u32,
    #[serde(rename = "State")]
    pub state: TradeState,
}

impl<'a> From<&'a AggregatedGroup> for ReportRow<'a> {
    fn from(group: &'a AggregatedGroup) -> Self {
        Self {
            correlation_id: &group.correlation_id,
            number_of_trades: group.number_of_trades,
            state: group.state,
        }
    }
}

fn csv_error(err: csv::Error) -> Error {
    Error::output(err.to_string())
}

/// Writes aggregated groups as delimited text with a header row.
pub struct CsvReport {
    config: OutputConfig,
}

impl CsvReport {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write the report to any writer, in the order given.
    pub fn write_to<W: Write>(&self, writer: W, groups: &[AggregatedGroup]) -> Result<()> {
        let delimiter = self.config.delimiter_byte()?;

        let mut out = csv::WriterBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .from_writer(writer);

        if groups.is_empty() {
            // serialize() only emits the header alongside the first record
            out.write_record(["CorrelationID", "NumberOfTrades", "State"])
                .map_err(csv_error)?;
        }
        for group in groups {
            out.serialize(ReportRow::from(group)).map_err(csv_error)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render the report into a string.
    pub fn render(&self, groups: &[AggregatedGroup]) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, groups)?;
        String::from_utf8(buf).map_err(|e| Error::output(e.to_string()))
    }

    /// Write the report to `path`.
    ///
    /// The report is rendered fully before the file is created.
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        groups: &[AggregatedGroup],
        diagnostics: &dyn Diagnostics,
    ) -> Result<()> {
        let path = path.as_ref();
        let rendered = self.render(groups)?;
        std::fs::write(path, rendered)?;
        diagnostics.info(&format!("finished writing to csv: {}", path.display()));
        Ok(())
    }
}

impl Default for CsvReport {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
