use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use moneta_core::connector::{
    ConnectorKey, IndicatorCatalogProvider, MonetaConnector, ObservationProvider,
};
use moneta_core::{
    Frequency, IndicatorInfo, MonetaError, Observation, Series, SeriesMeta, SeriesRequest,
};
use serde::Deserialize;

use crate::adapter::{HttpFetch, endpoint, normalize_error};
use crate::parse::{parse_period, parse_value};

#[derive(Debug, Deserialize)]
struct IndicatorsResponse {
    indicators: BTreeMap<String, RawIndicator>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIndicator {
    label: Option<String>,
    description: Option<String>,
    source: Option<String>,
    unit: Option<String>,
    dataset: Option<String>,
}

// indicator -> country -> year -> value
type Values = BTreeMap<String, BTreeMap<String, BTreeMap<String, Option<serde_json::Number>>>>;

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Values,
}

/// IMF DataMapper connector.
///
/// Lists the published indicators and serves annual values for request ids of
/// the form `<indicator>/<country>`, e.g. `NGDPD/USA`.
pub struct ImfConnector {
    http: Arc<dyn HttpFetch>,
    base: String,
}

impl ImfConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-imf");

    /// Connector querying the API rooted at `base`.
    pub fn new(http: Arc<dyn HttpFetch>, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    fn parse_indicators(body: &str) -> Result<Vec<IndicatorInfo>, MonetaError> {
        let resp: IndicatorsResponse =
            serde_json::from_str(body).map_err(|e| MonetaError::Data(e.to_string()))?;
        Ok(resp
            .indicators
            .into_iter()
            .filter(|(id, _)| !id.is_empty())
            .map(|(id, raw)| IndicatorInfo {
                id,
                label: raw.label,
                description: raw.description,
                source: raw.source,
                unit: raw.unit,
                dataset: raw.dataset,
            })
            .collect())
    }

    fn parse_values(
        body: &str,
        indicator: &str,
        country: &str,
    ) -> Result<Vec<Observation>, MonetaError> {
        let mut resp: ValuesResponse =
            serde_json::from_str(body).map_err(|e| MonetaError::Data(e.to_string()))?;
        let years = resp
            .values
            .remove(indicator)
            .and_then(|mut by_country| by_country.remove(country))
            .ok_or_else(|| MonetaError::not_found(format!("IMF {indicator} for {country}")))?;
        let mut out = Vec::with_capacity(years.len());
        for (year, value) in years {
            let Some(value) = value else { continue };
            if let Some(v) = parse_value(&value.to_string())? {
                out.push(Observation::new(parse_period(&year, None)?, v));
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl IndicatorCatalogProvider for ImfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::imf::indicators", skip(self))
    )]
    async fn indicators(&self) -> Result<Vec<IndicatorInfo>, MonetaError> {
        let url = endpoint(&self.base, &["indicators"])?;
        let what = "IMF indicator listing";
        let body = self
            .http
            .get_text(&url, "application/json")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), what))?;
        Self::parse_indicators(&body).map_err(|e| normalize_error(e, Self::KEY.as_str(), what))
    }
}

#[async_trait]
impl ObservationProvider for ImfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::imf::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let (indicator, country) = req.id.split_once('/').ok_or_else(|| {
            MonetaError::InvalidArg(format!("IMF id '{}' must be <indicator>/<country>", req.id))
        })?;
        let url = endpoint(&self.base, &[indicator, country])?;
        let what = format!("IMF series {}", req.id);
        let body = self
            .http
            .get_text(&url, "application/json")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        let mut observations = Self::parse_values(&body, indicator, country)
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        if let Some(start) = req.start {
            observations.retain(|o| o.date >= start);
        }
        Ok(Series {
            observations,
            meta: Some(SeriesMeta {
                frequency: Some(Frequency::Annual),
                ..SeriesMeta::default()
            }),
        })
    }
}

impl MonetaConnector for ImfConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "International Monetary Fund"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }

    fn as_indicator_catalog_provider(&self) -> Option<&dyn IndicatorCatalogProvider> {
        Some(self as &dyn IndicatorCatalogProvider)
    }
}
