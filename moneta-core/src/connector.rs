use async_trait::async_trait;

use crate::MonetaError;
pub use moneta_types::ConnectorKey;
use moneta_types::{IndicatorInfo, Series, SeriesRequest};

/// Focused role trait for connectors that serve dated observations.
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    /// Fetch the full series identified by `req`.
    ///
    /// Implementations return observations sorted by date with missing values
    /// already dropped.
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError>;
}

/// Focused role trait for connectors that can list the indicators they publish.
#[async_trait]
pub trait IndicatorCatalogProvider: Send + Sync {
    /// Fetch the indicator listing.
    async fn indicators(&self) -> Result<Vec<IndicatorInfo>, MonetaError>;
}

/// Main connector trait implemented by source crates. Exposes capability discovery.
#[async_trait]
pub trait MonetaConnector: Send + Sync {
    /// A stable identifier referenced by region catalogs (e.g. "moneta-ecb").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise observation capability by returning a usable trait object reference when supported.
    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        None
    }

    /// If implemented, returns a trait object for indicator listings.
    fn as_indicator_catalog_provider(&self) -> Option<&dyn IndicatorCatalogProvider> {
        None
    }
}
