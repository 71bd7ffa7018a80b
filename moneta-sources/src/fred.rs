use std::sync::Arc;

use async_trait::async_trait;
use moneta_core::connector::{ConnectorKey, MonetaConnector, ObservationProvider};
use moneta_core::{MonetaError, Observation, Series, SeriesMeta, SeriesRequest};
use serde::Deserialize;

use crate::adapter::{HttpFetch, endpoint, normalize_error};
use crate::parse::{parse_period, parse_value};

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// FRED (Federal Reserve Economic Data) connector.
///
/// The request id is a FRED series id such as `GDP`, `CPIAUCSL` or `USREC`.
/// An API key is required; requests fail with `InvalidArg` without one.
pub struct FredConnector {
    http: Arc<dyn HttpFetch>,
    base: String,
    api_key: Option<String>,
}

impl FredConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-fred");

    /// Connector querying the API rooted at `base` with `api_key`.
    pub fn new(http: Arc<dyn HttpFetch>, base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base: base.into(),
            api_key,
        }
    }

    fn parse(body: &str) -> Result<Vec<Observation>, MonetaError> {
        let resp: ObservationsResponse =
            serde_json::from_str(body).map_err(|e| MonetaError::Data(e.to_string()))?;
        let mut out = Vec::with_capacity(resp.observations.len());
        for raw in resp.observations {
            // FRED reports missing values as "."
            if let Some(value) = parse_value(&raw.value)? {
                out.push(Observation::new(parse_period(&raw.date, Some("%Y-%m-%d"))?, value));
            }
        }
        out.sort_by_key(|o| o.date);
        Ok(out)
    }
}

#[async_trait]
impl ObservationProvider for FredConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::fred::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            MonetaError::InvalidArg("FRED API key missing; set FRED_API_KEY".into())
        })?;
        let mut url = endpoint(&self.base, &["series", "observations"])?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("series_id", &req.id)
                .append_pair("api_key", api_key)
                .append_pair("file_type", "json");
            if let Some(start) = req.start {
                q.append_pair("observation_start", &start.format("%Y-%m-%d").to_string());
            }
        }
        let what = format!("FRED series {}", req.id);
        let body = self
            .http
            .get_text(&url, "application/json")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        let observations =
            Self::parse(&body).map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        Ok(Series {
            observations,
            meta: Some(SeriesMeta {
                title: Some(req.id.clone()),
                ..SeriesMeta::default()
            }),
        })
    }
}

impl MonetaConnector for FredConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Federal Reserve Bank of St. Louis"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }
}
