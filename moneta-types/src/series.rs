//! Observations, series and the requests that produce them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::connector::ConnectorKey;
use crate::domain::{Frequency, Indicator, Region};

/// A single dated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date; monthly data is labelled with the first day of the month.
    pub date: NaiveDate,
    /// Observed value.
    pub value: Decimal,
}

impl Observation {
    /// Construct an observation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// Descriptive metadata a source may attach to a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMeta {
    /// Source-provided title.
    pub title: Option<String>,
    /// Units of measurement, as reported by the source.
    pub units: Option<String>,
    /// Native frequency, when the source states it.
    pub frequency: Option<Frequency>,
}

/// A dated series of observations as returned by a connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Observations; connectors return them sorted by date.
    pub observations: Vec<Observation>,
    /// Optional descriptive metadata.
    pub meta: Option<SeriesMeta>,
}

impl Series {
    /// Build a series without metadata.
    #[must_use]
    pub const fn new(observations: Vec<Observation>) -> Self {
        Self {
            observations,
            meta: None,
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series carries no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last observation dates, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.first()?.date;
        let last = self.observations.last()?.date;
        Some((first, last))
    }

    /// Value observed exactly on `date`.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<Decimal> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|i| self.observations[i].value)
    }
}

/// What to ask a connector for.
///
/// `id` is interpreted by the connector (an ECB `flow/key`, an SNB cube id, a
/// FRED series id, a registered file name). `params` carries extra query
/// dimensions in insertion-independent order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Connector-specific series identifier.
    pub id: String,
    /// Additional connector-specific parameters.
    pub params: BTreeMap<String, String>,
    /// Earliest date of interest, if the source supports filtering.
    pub start: Option<NaiveDate>,
}

impl SeriesRequest {
    /// Request the series `id` without extra parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: BTreeMap::new(),
            start: None,
        }
    }

    /// Add a connector-specific parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Restrict the request to observations on or after `start`.
    #[must_use]
    pub const fn starting(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Binds a request to the connector that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesSource {
    /// Connector expected to serve the request.
    pub connector: ConnectorKey,
    /// Request forwarded to that connector.
    pub request: SeriesRequest,
}

impl SeriesSource {
    /// Construct a binding.
    #[must_use]
    pub const fn new(connector: ConnectorKey, request: SeriesRequest) -> Self {
        Self { connector, request }
    }

    /// Compact label used in logs and attribution (`connector:id`).
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:{}", self.connector, self.request.id)
    }
}

/// The sources configured for every indicator of one region.
///
/// Each indicator maps to a priority-ordered list: the first source is
/// preferred and later ones backfill dates it does not cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    /// Region described by this spec.
    pub region: Region,
    /// Priority-ordered sources per indicator.
    pub sources: BTreeMap<Indicator, Vec<SeriesSource>>,
}

impl RegionSpec {
    /// Start an empty spec for `region`.
    #[must_use]
    pub const fn new(region: Region) -> Self {
        Self {
            region,
            sources: BTreeMap::new(),
        }
    }

    /// Append a source for `indicator`, after any already configured.
    #[must_use]
    pub fn with_source(mut self, indicator: Indicator, source: SeriesSource) -> Self {
        self.sources.entry(indicator).or_default().push(source);
        self
    }

    /// Sources configured for `indicator`, in priority order.
    #[must_use]
    pub fn sources_for(&self, indicator: Indicator) -> &[SeriesSource] {
        self.sources.get(&indicator).map_or(&[], Vec::as_slice)
    }
}

/// One row of an indicator listing (e.g. the IMF DataMapper catalog).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorInfo {
    /// Indicator identifier.
    pub id: String,
    /// Short label.
    pub label: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Originating source.
    pub source: Option<String>,
    /// Unit of measurement.
    pub unit: Option<String>,
    /// Dataset the indicator belongs to.
    pub dataset: Option<String>,
}
