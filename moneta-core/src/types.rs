//! Re-export of foundational types from `moneta-types`.
// Consolidated re-exports so downstream crates can depend on `moneta-core` only

pub use moneta_types::{Capability, ConnectorKey, MonetaError};
pub use moneta_types::{
    Attribution, DownloadReport, FrameReport, Span,
};
pub use moneta_types::{Endpoints, MergeStrategy, MonetaConfig, SourcesConfig};
pub use moneta_types::{Frame, FrameRow, Frequency, Indicator, Region};
pub use moneta_types::{
    IndicatorInfo, Observation, RegionSpec, Series, SeriesMeta, SeriesRequest, SeriesSource,
};

pub use moneta_types::Decimal;
