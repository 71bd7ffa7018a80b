//! Moneta-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod attribution;
mod capability;
mod config;
mod connector;
mod domain;
mod error;
mod frame;
mod reports;
mod series;

pub use attribution::{Attribution, Span};
pub use capability::Capability;
pub use config::{Endpoints, MergeStrategy, MonetaConfig, SourcesConfig};
pub use connector::ConnectorKey;
pub use domain::{Frequency, Indicator, Region};
pub use error::MonetaError;
pub use frame::{Frame, FrameRow};
pub use reports::{DownloadReport, FrameReport};
pub use series::{
    IndicatorInfo, Observation, RegionSpec, Series, SeriesMeta, SeriesRequest, SeriesSource,
};

pub use rust_decimal::Decimal;
