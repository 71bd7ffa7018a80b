//! moneta-core
//!
//! Core types, traits, and utilities shared across the moneta workspace.
//!
//! - `types`: regions, indicators, series, frames and configuration (re-exported
//!   from `moneta-types`).
//! - `connector`: the `MonetaConnector` trait and capability provider traits.
//! - `timeseries`: monthly alignment, merging, recession spans and growth rates.
//!
//! Connectors are async and assume the Tokio runtime; the time-series helpers
//! are plain synchronous functions over owned data.
#![warn(missing_docs)]

/// Connector capability traits and the primary `MonetaConnector` interface.
pub mod connector;
/// Time-series utilities for alignment, merging and derived measures.
pub mod timeseries;
pub mod types;

pub use connector::MonetaConnector;
pub use timeseries::change::{pct_change, year_over_year};
pub use timeseries::infer::{estimate_step_days, infer_frequency};
pub use timeseries::merge::{merge_series_by_priority, outer_join};
pub use timeseries::recession::recession_periods;
pub use timeseries::resample::{month_start, resample_to_monthly, shift_months};
pub use types::*;
