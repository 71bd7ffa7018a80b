//! moneta-mock
//!
//! Deterministic connectors for tests and offline runs:
//!
//! - [`MockConnector`]: static fixture series (`M3`, `M3-LEGACY`, `GDP`, `CPI`,
//!   `USREC`, `EMPTY`) plus the special ids `FAIL` and `TIMEOUT`.
//! - [`DynamicMockConnector`]: behavior scripted per series id by a controller.
use std::time::Duration;

use async_trait::async_trait;
use moneta_core::connector::{
    ConnectorKey, IndicatorCatalogProvider, MonetaConnector, ObservationProvider,
};
use moneta_core::{
    Indicator, IndicatorInfo, MonetaError, Region, RegionSpec, Series, SeriesRequest, SeriesSource,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
pub struct MockConnector {
    name: &'static str,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Static connector key used by [`mock_catalog`].
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-mock");

    /// Mock registered under the default name.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: Self::KEY.as_str(),
        }
    }

    /// Same fixtures under another connector name, for priority tests.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    async fn maybe_fail_or_timeout(&self, id: &str, capability: &str) -> Result<(), MonetaError> {
        match id {
            "FAIL" => Err(MonetaError::connector(
                self.name,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough for a short provider timeout to fire.
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ObservationProvider for MockConnector {
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        self.maybe_fail_or_timeout(&req.id, "observations").await?;
        let mut series = fixtures::series::by_id(&req.id)
            .ok_or_else(|| MonetaError::not_found(format!("series {}", req.id)))?;
        if let Some(start) = req.start {
            series.observations.retain(|o| o.date >= start);
        }
        Ok(series)
    }
}

#[async_trait]
impl IndicatorCatalogProvider for MockConnector {
    async fn indicators(&self) -> Result<Vec<IndicatorInfo>, MonetaError> {
        Ok(fixtures::indicators::all())
    }
}

impl MonetaConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }

    fn as_indicator_catalog_provider(&self) -> Option<&dyn IndicatorCatalogProvider> {
        Some(self as &dyn IndicatorCatalogProvider)
    }
}

fn mock(id: &str) -> SeriesSource {
    SeriesSource::new(MockConnector::KEY, SeriesRequest::new(id))
}

/// Every region wired to the mock fixtures.
#[must_use]
pub fn mock_catalog() -> Vec<RegionSpec> {
    Region::ALL
        .into_iter()
        .map(|region| {
            RegionSpec::new(region)
                .with_source(Indicator::M3, mock("M3"))
                .with_source(Indicator::Gdp, mock("GDP"))
                .with_source(Indicator::Cpi, mock("CPI"))
        })
        .collect()
}

/// Recession flag fixture served by [`MockConnector`].
#[must_use]
pub fn mock_recession_source() -> SeriesSource {
    mock("USREC")
}
