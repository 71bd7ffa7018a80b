use std::collections::BTreeSet;

use moneta_core::{DownloadReport, MonetaError, Region};

use crate::Moneta;

impl Moneta {
    /// Build frames for several regions concurrently.
    ///
    /// Behavior:
    /// - Each region runs [`region_frame`](Self::region_frame), bounded by its own
    ///   request deadline.
    /// - A region that fails is left out of `frames` and its error is recorded in
    ///   `warnings`; the other regions are unaffected.
    /// - Non-fatal issues of successful frames (failed backfill or recession
    ///   sources) are copied into `warnings` as well, tagged with their region.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `regions` is empty or lists a region twice.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "moneta::router::download",
            skip(self, regions),
            fields(regions = regions.len()),
        )
    )]
    pub async fn download(&self, regions: &[Region]) -> Result<DownloadReport, MonetaError> {
        if regions.is_empty() {
            return Err(MonetaError::InvalidArg(
                "download requires at least one region".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        for r in regions {
            if !seen.insert(*r) {
                return Err(MonetaError::InvalidArg(format!("duplicate region '{r}'")));
            }
        }

        let tasks = regions
            .iter()
            .map(|&region| async move { (region, self.region_frame(region).await) });
        let joined = futures::future::join_all(tasks).await;

        let mut report = DownloadReport::default();
        for (region, res) in joined {
            match res {
                Ok(frame) => {
                    report
                        .warnings
                        .extend(frame.warnings.iter().cloned().map(|w| (region, w)));
                    report.frames.insert(region, frame);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(region = %region, error = %e, "region failed");
                    report.warnings.push((region, e));
                }
            }
        }
        Ok(report)
    }
}
