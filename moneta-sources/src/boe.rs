use std::sync::Arc;

use async_trait::async_trait;
use chrono::Days;
use moneta_core::connector::{ConnectorKey, MonetaConnector, ObservationProvider};
use moneta_core::{MonetaError, Observation, Series, SeriesRequest};
use url::Url;

use crate::adapter::{HttpFetch, normalize_error};
use crate::parse::{CsvLayout, read_observations};

const DEFAULT_FROM: &str = "01/Jan/1963";

/// Bank of England interactive statistical database connector.
///
/// The request id is a series code such as `LPMAUYN`. The database labels
/// monthly values with the last day of the month; each date is moved one day
/// forward so it lands on the following month start.
pub struct BoeConnector {
    http: Arc<dyn HttpFetch>,
    base: String,
}

impl BoeConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-boe");

    /// Connector querying the CSV export endpoint at `base`.
    pub fn new(http: Arc<dyn HttpFetch>, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    fn url(&self, req: &SeriesRequest) -> Result<Url, MonetaError> {
        let mut url = Url::parse(&self.base).map_err(|e| {
            MonetaError::InvalidArg(format!("invalid base url '{}': {e}", self.base))
        })?;
        let from = req
            .start
            .map_or_else(|| DEFAULT_FROM.to_string(), |d| d.format("%d/%b/%Y").to_string());
        url.query_pairs_mut()
            .append_pair("csv.x", "yes")
            .append_pair("Datefrom", &from)
            .append_pair("SeriesCodes", &req.id)
            .append_pair("CSVF", "TN")
            .append_pair("UsingCodes", "Y")
            .append_pair("VPD", "Y")
            .append_pair("VFD", "N");
        Ok(url)
    }
}

#[async_trait]
impl ObservationProvider for BoeConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::boe::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let url = self.url(req)?;
        let what = format!("BoE series {}", req.id);
        let text = self
            .http
            .get_text(&url, "text/csv")
            .await
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?;
        let observations = read_observations(&text, &CsvLayout::named("DATE", req.id.as_str()))
            .map_err(|e| normalize_error(e, Self::KEY.as_str(), &what))?
            .into_iter()
            .map(|o| {
                o.date
                    .checked_add_days(Days::new(1))
                    .map(|date| Observation::new(date, o.value))
                    .ok_or_else(|| MonetaError::Data(format!("date out of range: {}", o.date)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Series::new(observations))
    }
}

impl MonetaConnector for BoeConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Bank of England"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }
}
