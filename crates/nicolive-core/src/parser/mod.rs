//! HTML parsers for niconico Live pages
//!
//! Contains the streaming embedded-data extractor.

pub mod embedded_data;

pub use embedded_data::{EmbeddedDataScanner, extract_embedded_data};
