use std::sync::Arc;

use async_trait::async_trait;
use moneta_core::connector::{ConnectorKey, MonetaConnector, ObservationProvider};
use moneta_core::{MonetaError, Series, SeriesRequest};

use crate::adapter::{HttpFetch, endpoint, normalize_error};
use crate::parse::{CsvLayout, read_observations};

/// Swiss National Bank data portal connector.
///
/// The request id is the cube id (e.g. `snbmonagg`); `params` are forwarded as
/// query parameters, typically `dimSel`. The request start becomes `fromDate`.
pub struct SnbConnector {
    http: Arc<dyn HttpFetch>,
    base: String,
}

impl SnbConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-snb");

    /// Connector querying the cube API rooted at `base`.
    pub fn new(http: Arc<dyn HttpFetch>, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }
}

#[async_trait]
impl ObservationProvider for SnbConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::snb::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let mut url = endpoint(&self.base, &[&req.id, "data", "csv", "en"])?;
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in &req.params {
                q.append_pair(k, v);
            }
            if let Some(start) = req.start
                && req.param("fromDate").is_none()
            {
                q.append_pair("fromDate", &start.format("%Y-%m").to_string());
            }
        }
        let what = format!("SNB cube {}", req.id);
        let text = self
            .http
            .get_text(&url, "text/csv")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        // Two lines of title and publication date precede the header.
        let layout = CsvLayout::default().delimiter(b';').skip_rows(2);
        let observations = read_observations(&text, &layout)
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        Ok(Series::new(observations))
    }
}

impl MonetaConnector for SnbConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Swiss National Bank"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }
}
