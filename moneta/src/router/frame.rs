use moneta_core::{
    Capability, Frame, FrameReport, Indicator, MonetaError, Region, Series, outer_join,
    year_over_year,
};

use crate::Moneta;
use crate::router::series::MergedSeries;
use crate::router::util::join_with_deadline;

/// Frame columns in order; `None` is the recession flag.
const COLUMNS: [Option<Indicator>; 4] = [
    Some(Indicator::M3),
    Some(Indicator::Gdp),
    Some(Indicator::Cpi),
    None,
];

const RECESSION: &str = "recession";
const VELOCITY: &str = "v";

/// Columns whose year-over-year change [`Moneta::growth`] reports.
const GROWTH_COLUMNS: [&str; 3] = ["m3", "gdp", VELOCITY];

impl Moneta {
    async fn fetch_column(
        &self,
        region: Region,
        indicator: Option<Indicator>,
    ) -> Result<MergedSeries, MonetaError> {
        match indicator {
            Some(ind) => self.fetch_indicator(region, ind).await,
            None => self.fetch_recession(region).await,
        }
    }

    /// Build the aligned monthly frame for a region.
    ///
    /// Behavior:
    /// - Money supply, GDP, CPI and the recession flag are fetched concurrently,
    ///   bounded by the request deadline.
    /// - Each column is aligned to month starts (quarterly values are carried
    ///   forward) and the columns are outer-joined on the union of their months,
    ///   in the order `m3, gdp, cpi, recession`.
    /// - `v = gdp / m3` is appended; a cell is empty when either side is missing.
    /// - Rows before the configured `start` are dropped.
    /// - A recession source that fails leaves the `recession` column empty and
    ///   adds a warning; with no recession source configured the column is
    ///   empty without a warning.
    ///
    /// # Errors
    /// Returns the first failing indicator's error (in column order), `NotFound`
    /// for an unconfigured region, or `RequestTimeout` when the deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "moneta::router::region_frame",
            skip(self),
            fields(region = %region),
        )
    )]
    pub async fn region_frame(&self, region: Region) -> Result<FrameReport, MonetaError> {
        if !self.regions.contains_key(&region) {
            return Err(MonetaError::not_found(format!("region {region}")));
        }

        let tasks = COLUMNS.map(|ind| self.fetch_column(region, ind));
        let joined = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| MonetaError::request_timeout(Capability::RegionFrame))?;

        let mut columns: Vec<(&'static str, Series)> = Vec::with_capacity(COLUMNS.len());
        let mut attribution = Vec::new();
        let mut warnings = Vec::new();
        for (ind, res) in COLUMNS.into_iter().zip(joined) {
            let name = ind.map_or(RECESSION, Indicator::column);
            match (ind, res) {
                (_, Ok(merged)) => {
                    warnings.extend(merged.warnings);
                    attribution.push(merged.attribution);
                    columns.push((name, merged.series));
                }
                (None, Err(MonetaError::Unsupported { .. })) => {
                    columns.push((name, Series::default()));
                }
                (None, Err(e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "recession flag unavailable");
                    warnings.push(e);
                    columns.push((name, Series::default()));
                }
                (Some(_), Err(e)) => return Err(e),
            }
        }

        let mut frame = outer_join(columns)?;
        frame.derive_ratio(VELOCITY, Indicator::Gdp.column(), Indicator::M3.column())?;
        if let Some(start) = self.cfg.start {
            frame = frame.since(start);
        }

        Ok(FrameReport {
            region,
            frame,
            attribution,
            warnings,
        })
    }

    /// Year-over-year change of money supply, GDP and velocity.
    ///
    /// The result keeps the input's dates with columns `m3`, `gdp` and `v`;
    /// the first twelve months (and any month whose base is missing or zero)
    /// are empty.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the frame lacks one of the columns.
    pub fn growth(&self, frame: &Frame) -> Result<Frame, MonetaError> {
        year_over_year(frame, &GROWTH_COLUMNS)
    }
}
