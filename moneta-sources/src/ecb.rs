use std::sync::Arc;

use async_trait::async_trait;
use moneta_core::connector::{ConnectorKey, MonetaConnector, ObservationProvider};
use moneta_core::{Frequency, MonetaError, Series, SeriesMeta, SeriesRequest};

use crate::adapter::{HttpFetch, endpoint, normalize_error};
use crate::parse::{CsvLayout, read_observations};

/// ECB data portal connector (SDMX 2.1 REST, CSV output).
///
/// Request ids take the form `<flow>/<key>`, e.g. `BSI/M.U2.N.V.M30.X.1.U2.2300.Z01.E`.
pub struct EcbConnector {
    http: Arc<dyn HttpFetch>,
    base: String,
}

impl EcbConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-ecb");

    /// Connector querying the API rooted at `base`.
    pub fn new(http: Arc<dyn HttpFetch>, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    // The first key dimension is the SDMX frequency code.
    fn frequency(key: &str) -> Option<Frequency> {
        match key.split('.').next()? {
            "M" => Some(Frequency::Monthly),
            "Q" => Some(Frequency::Quarterly),
            "A" => Some(Frequency::Annual),
            _ => None,
        }
    }
}

#[async_trait]
impl ObservationProvider for EcbConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::ecb::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let (flow, key) = req.id.split_once('/').ok_or_else(|| {
            MonetaError::InvalidArg(format!("ECB id '{}' must be <flow>/<key>", req.id))
        })?;
        let mut url = endpoint(&self.base, &["data", flow, key])?;
        if let Some(start) = req.start {
            url.query_pairs_mut()
                .append_pair("startPeriod", &start.format("%Y-%m").to_string());
        }
        let what = format!("ECB series {}", req.id);
        let text = self
            .http
            .get_text(&url, "text/csv")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        let observations = read_observations(&text, &CsvLayout::named("TIME_PERIOD", "OBS_VALUE"))
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        Ok(Series {
            observations,
            meta: Some(SeriesMeta {
                frequency: Self::frequency(key),
                ..SeriesMeta::default()
            }),
        })
    }
}

impl MonetaConnector for EcbConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "European Central Bank"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }
}
