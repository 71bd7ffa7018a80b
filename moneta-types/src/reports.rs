//! Report envelopes produced by the orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribution::Attribution;
use crate::domain::Region;
use crate::error::MonetaError;
use crate::frame::Frame;

/// Aligned frame for one region together with its provenance.
///
/// Columns are `m3`, `gdp`, `cpi`, `recession` and the derived velocity `v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Region the frame describes.
    pub region: Region,
    /// Monthly aligned frame.
    pub frame: Frame,
    /// Which connector supplied which span of each column.
    pub attribution: Vec<Attribution>,
    /// Non-fatal issues, e.g. a backfill source that failed while the primary succeeded.
    pub warnings: Vec<MonetaError>,
}

/// Summary of building frames for several regions.
///
/// Regions that failed entirely are absent from `frames` and their error is
/// recorded in `warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DownloadReport {
    /// Successfully built frames.
    pub frames: BTreeMap<Region, FrameReport>,
    /// Failures and non-fatal issues, tagged with the region they belong to.
    pub warnings: Vec<(Region, MonetaError)>,
}
