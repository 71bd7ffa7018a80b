//! moneta-sources
//!
//! Connectors implementing `MonetaConnector` for the public sources the
//! default region catalog draws on:
//!
//! - `csv_file`: locally downloaded CSV files, one registered layout per id.
//! - `ecb`: ECB data portal (SDMX REST, CSV output).
//! - `snb`: Swiss National Bank data portal cubes.
//! - `boe`: Bank of England interactive statistical database.
//! - `fred`: St. Louis Fed FRED API (JSON).
//! - `imf`: IMF DataMapper API (indicator listing and annual values).
//!
//! HTTP connectors share one [`adapter::HttpFetch`] so tests can inject
//! canned responses without a network.
#![warn(missing_docs)]

/// HTTP abstraction shared by the network connectors.
pub mod adapter;
/// Region wiring: which connector serves which indicator.
pub mod catalog;
/// Date and value parsing for the CSV layouts the sources publish.
pub mod parse;

mod boe;
mod csv_file;
mod ecb;
mod fred;
mod imf;
mod snb;

pub use boe::BoeConnector;
pub use catalog::{
    default_catalog, default_connectors, default_csv_files, recession_source, region_spec,
};
pub use csv_file::CsvFileConnector;
pub use ecb::EcbConnector;
pub use fred::FredConnector;
pub use imf::ImfConnector;
pub use parse::{Column, CsvLayout, parse_period, parse_value, read_observations};
pub use snb::SnbConnector;
