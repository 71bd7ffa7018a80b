//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `infer`: estimate the native cadence of a series
//! - `merge`: priority merge of one indicator's sources and outer joins across indicators
//! - `resample`: align series to a month-start calendar
//! - `recession`: turn a 0/1 flag series into recession spans
//! - `change`: period-over-period relative changes on frames
/// Relative change helpers for frames.
pub mod change;
/// Frequency inference helpers.
pub mod infer;
/// Merge utilities for joining series.
pub mod merge;
/// Recession interval extraction.
pub mod recession;
/// Monthly resampling.
pub mod resample;
