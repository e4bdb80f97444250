//! Trade extraction from XML documents.
//!
//! The whole document is parsed into memory, then every element named by
//! [`IngestionConfig::trade_tag`] is turned into a [`TradeRecord`] in
//! document order. Field values are kept as text here.

use std::path::Path;

use roxmltree::{Document, Node};
use trade_core::config::IngestionConfig;
use trade_core::{field, Diagnostics, Error, Result, TradeRecord};

/// Read an input document into memory.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path.as_ref())?)
}

/// Extracts trade records from an XML document.
pub struct XmlIngestor {
    config: IngestionConfig,
}

impl XmlIngestor {
    /// Create an ingestor for the given element/attribute names.
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// Read and parse a file.
    pub fn ingest_file(
        &self,
        path: impl AsRef<Path>,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Vec<TradeRecord>> {
        let text = read_document(path)?;
        self.parse_str(&text, diagnostics)
    }

    /// Parse a document and extract every trade element.
    pub fn parse_str(&self, text: &str, diagnostics: &dyn Diagnostics) -> Result<Vec<TradeRecord>> {
        diagnostics.info("Parsing input xml file ...");
        let doc = Document::parse(text).map_err(|e| {
            diagnostics.error("Failed to parse XML file! Check file is a valid XML file.");
            Error::parse(e.to_string())
        })?;

        let records = doc
            .descendants()
            .filter(|node| node.is_element() && node.has_tag_name(self.config.trade_tag.as_str()))
            .map(|node| self.extract(&doc, node))
            .collect::<Result<Vec<_>>>()?;

        diagnostics.info("Trades parsed from input source");
        diagnostics.debug(&format!("{} trade elements found", records.len()));
        Ok(records)
    }

    fn extract(&self, doc: &Document, node: Node) -> Result<TradeRecord> {
        let pos = doc.text_pos_at(node.range().start);
        let location = format!(
            "{} element at line {}, column {}",
            self.config.trade_tag, pos.row, pos.col
        );

        let attr = |name: &str| -> Result<String> {
            node.attribute(name)
                .map(str::to_string)
                .ok_or_else(|| Error::input_format(&location, name, "attribute missing"))
        };

        // Value is the first child's text, as in <Trade ...>700</Trade>.
        let value = node
            .text()
            .map(str::to_string)
            .ok_or_else(|| Error::input_format(&location, field::VALUE, "element has no text content"))?;

        Ok(TradeRecord {
            correlation_id: attr(self.config.correlation_attr.as_str())?,
            number_of_trades: attr(self.config.trade_count_attr.as_str())?,
            limit: attr(self.config.limit_attr.as_str())?,
            value,
            trade_id: attr(self.config.trade_id_attr.as_str())?,
        })
    }
}

impl Default for XmlIngestor {
    fn default() -> Self {
        Self::new(IngestionConfig::default())
    }
}
