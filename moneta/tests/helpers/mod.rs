use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moneta::{
    ConnectorKey, Decimal, MergeStrategy, Moneta, MonetaBuilder, Observation, Series,
    SeriesRequest, SeriesSource,
};
use moneta_mock::{MockConnector, mock_catalog, mock_recession_source};

// ---------- Lightweight fixtures and helpers for tests ----------

/// First day of a month.
pub fn d(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).expect("valid test month")
}

/// Monthly series starting at `(y, m)` with one observation per value.
pub fn monthly(y: i32, m: u32, values: &[i64]) -> Series {
    let start = d(y, m);
    let observations = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let date = start
                .checked_add_months(chrono::Months::new(u32::try_from(i).unwrap()))
                .unwrap();
            Observation::new(date, Decimal::from(*v))
        })
        .collect();
    Series::new(observations)
}

/// Bind `id` to the connector named `connector`.
pub fn source(connector: &'static str, id: &str) -> SeriesSource {
    SeriesSource::new(ConnectorKey::new(connector), SeriesRequest::new(id))
}

/// Builder wired to the fixture mock for every region, plus the recession flag.
pub fn mock_builder() -> MonetaBuilder {
    Moneta::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_regions(mock_catalog())
        .recession_source(mock_recession_source())
}

/// Orchestrator over the fixture mock using `strategy`.
pub fn mock_moneta(strategy: MergeStrategy) -> Moneta {
    mock_builder()
        .merge_strategy(strategy)
        .build()
        .expect("mock orchestrator")
}

/// Short provider timeout for tests exercising hanging connectors.
pub const FAST: Duration = Duration::from_millis(30);
