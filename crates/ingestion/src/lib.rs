//! Record ingestion for the trade analyzer.
//!
//! This crate handles:
//! - Reading the input document
//! - Locating trade elements and extracting their fields
//! - Validated numeric coercion into typed trades

pub mod coerce;
pub mod xml_reader;

pub use coerce::coerce_records;
pub use xml_reader::{read_document, XmlIngestor};
