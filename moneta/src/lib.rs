//! Moneta orchestrates macroeconomic series requests across statistical sources.
//!
//! Overview
//! - Routes each configured `SeriesSource` to the connector it names.
//! - Merges the sources of one indicator by priority, recording which connector
//!   supplied which stretch of dates.
//! - Aligns money supply, GDP, CPI and the recession flag of a region onto a
//!   monthly calendar and derives the velocity of money `v = gdp / m3`.
//! - Normalizes error handling and exposes uniform domain types from `moneta_core`.
//!
//! Key behaviors and trade-offs
//! - Indicator merge:
//!   - `Deep`: fetch every configured source concurrently and backfill gaps; most
//!     complete series, more requests.
//!   - `Fallback`: first non-empty source wins; economical but drops history that
//!     only lower-priority sources cover.
//! - Every source is resampled to month starts before merging, so a quarterly
//!   primary and a monthly backfill line up date by date.
//! - A failing recession source degrades to an empty `recession` column plus a
//!   warning; failing money supply, GDP or CPI sources fail the region.
//!
//! Examples
//! Building an orchestrator over the mock connector:
//! ```rust,ignore
//! use std::sync::Arc;
//! use moneta::{Moneta, MergeStrategy, Region};
//!
//! let moneta = Moneta::builder()
//!     .with_connector(Arc::new(moneta_mock::MockConnector::new()))
//!     .with_regions(moneta_mock::mock_catalog())
//!     .recession_source(moneta_mock::mock_recession_source())
//!     .merge_strategy(MergeStrategy::Deep)
//!     .build()?;
//!
//! let report = moneta.region_frame(Region::Us).await?;
//! let growth = moneta.growth(&report.frame)?;
//! let periods = moneta.recession_periods().await?;
//! ```
//!
//! Building several regions at once, keeping partial results:
//! ```rust,ignore
//! let report = moneta.download(&[Region::Us, Region::Eu]).await?;
//! for (region, err) in &report.warnings {
//!     eprintln!("{region}: {err}");
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Moneta, MonetaBuilder, tag_err};
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use moneta_core::{
    Attribution, Capability, ConnectorKey, Decimal, DownloadReport, Frame, FrameReport, FrameRow,
    Frequency, Indicator, IndicatorInfo, MergeStrategy, MonetaConfig, MonetaConnector,
    MonetaError, Observation, Region, RegionSpec, Series, SeriesMeta, SeriesRequest,
    SeriesSource, SourcesConfig, Span, month_start,
};
