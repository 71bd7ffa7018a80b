//! Configuration types shared across the orchestrator, connectors and CLI.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Strategy for combining the sources configured for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Fetch every configured source concurrently and backfill dates missing
    /// from higher-priority sources with lower-priority ones.
    #[default]
    Deep,
    /// Try sources in priority order and stop at the first non-empty series.
    Fallback,
}

/// Global configuration for the `Moneta` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonetaConfig {
    /// How sources of one indicator are combined.
    pub merge_strategy: MergeStrategy,
    /// Timeout for individual provider requests.
    #[serde(with = "duration_secs")]
    pub provider_timeout: Duration,
    /// Optional deadline for a whole region frame (all indicators fetched concurrently).
    #[serde(with = "opt_duration_secs")]
    pub request_timeout: Option<Duration>,
    /// Drop frame rows dated before this month.
    pub start: Option<NaiveDate>,
}

impl Default for MonetaConfig {
    fn default() -> Self {
        Self {
            merge_strategy: MergeStrategy::default(),
            provider_timeout: Duration::from_secs(30),
            request_timeout: None,
            start: None,
        }
    }
}

/// Settings consumed by the network and file connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Directory holding the locally downloaded CSV files.
    pub data_dir: PathBuf,
    /// FRED API key; falls back to the `FRED_API_KEY` environment variable.
    pub fred_api_key: Option<String>,
    /// `User-Agent` sent with every HTTP request.
    pub user_agent: String,
    /// Base URL overrides, mostly for testing against local mock servers.
    pub endpoints: Endpoints,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fred_api_key: None,
            user_agent: "MoneyGrowth".to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Base URLs of the statistical APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// ECB data portal SDMX REST root.
    pub ecb: String,
    /// SNB data portal cube API root.
    pub snb: String,
    /// Bank of England interactive database CSV endpoint.
    pub boe: String,
    /// FRED REST API root.
    pub fred: String,
    /// IMF DataMapper API root.
    pub imf: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ecb: "https://data-api.ecb.europa.eu/service".to_string(),
            snb: "https://data.snb.ch/api/cube".to_string(),
            boe: "https://www.bankofengland.co.uk/boeapps/iadb/fromshowcolumns.asp".to_string(),
            fred: "https://api.stlouisfed.org/fred".to_string(),
            imf: "https://www.imf.org/external/datamapper/api/v1".to_string(),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

mod opt_duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}
