use std::collections::{BTreeMap, HashSet};
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moneta_core::connector::ConnectorKey;
use moneta_core::{
    MergeStrategy, MonetaConfig, MonetaConnector, MonetaError, Region, RegionSpec, SeriesSource,
};

/// Orchestrator that routes series requests across registered connectors.
pub struct Moneta {
    pub(crate) connectors: Vec<Arc<dyn MonetaConnector>>,
    pub(crate) regions: BTreeMap<Region, RegionSpec>,
    pub(crate) recession: Option<SeriesSource>,
    pub(crate) cfg: MonetaConfig,
}

/// Builder for constructing a `Moneta` orchestrator with custom configuration.
pub struct MonetaBuilder {
    connectors: Vec<Arc<dyn MonetaConnector>>,
    regions: BTreeMap<Region, RegionSpec>,
    recession: Option<SeriesSource>,
    cfg: MonetaConfig,
}

impl Default for MonetaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MonetaBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors, no regions and no recession source. Defaults:
    /// deep merge, 30s provider timeout, no request deadline, no start date.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            regions: BTreeMap::new(),
            recession: None,
            cfg: MonetaConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Connectors are looked up by name when a region source refers to them.
    /// Registration order decides which catalog provider answers `indicators`.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MonetaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Configure the sources of one region, replacing any earlier spec for it.
    #[must_use]
    pub fn with_region(mut self, spec: RegionSpec) -> Self {
        self.regions.insert(spec.region, spec);
        self
    }

    /// Configure several regions at once (see [`with_region`](Self::with_region)).
    #[must_use]
    pub fn with_regions<I: IntoIterator<Item = RegionSpec>>(mut self, specs: I) -> Self {
        for spec in specs {
            self.regions.insert(spec.region, spec);
        }
        self
    }

    /// Series providing the 0/1 recession flag shared by every region.
    #[must_use]
    pub fn recession_source(mut self, source: SeriesSource) -> Self {
        self.recession = Some(source);
        self
    }

    /// Select how the sources of one indicator are combined.
    ///
    /// - `Deep`: fetch every source concurrently and backfill gaps by priority.
    /// - `Fallback`: try sources in order until one returns data.
    #[must_use]
    pub const fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.cfg.merge_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for building a region frame.
    ///
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Drop frame rows dated before `start`.
    #[must_use]
    pub const fn start(mut self, start: NaiveDate) -> Self {
        self.cfg.start = Some(start);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: MonetaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Moneta` orchestrator.
    ///
    /// Sources naming a connector that was never registered are dropped, as is
    /// an unknown recession source.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`](Self::with_connector).
    pub fn build(mut self) -> Result<Moneta, MonetaError> {
        if self.connectors.is_empty() {
            return Err(MonetaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        for spec in self.regions.values_mut() {
            for sources in spec.sources.values_mut() {
                sources.retain(|s| {
                    let ok = known.contains(s.connector.as_str());
                    #[cfg(feature = "tracing")]
                    if !ok {
                        tracing::warn!(source = %s.label(), region = %spec.region, "dropping source with unknown connector");
                    }
                    ok
                });
            }
        }
        if let Some(src) = &self.recession
            && !known.contains(src.connector.as_str())
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(source = %src.label(), "dropping recession source with unknown connector");
            self.recession = None;
        }

        Ok(Moneta {
            connectors: self.connectors,
            regions: self.regions,
            recession: self.recession,
            cfg: self.cfg,
        })
    }
}

/// Attach the connector name to errors that do not already identify their origin.
pub fn tag_err(connector: &str, e: MonetaError) -> MonetaError {
    match e {
        e @ (MonetaError::NotFound { .. }
        | MonetaError::ProviderTimeout { .. }
        | MonetaError::Connector { .. }
        | MonetaError::RequestTimeout { .. }
        | MonetaError::AllProvidersTimedOut { .. }
        | MonetaError::AllProvidersFailed(_)) => e,
        other => MonetaError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, failing with `RequestTimeout("request")` once `deadline` elapses.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    fut: F,
) -> Result<T, MonetaError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| MonetaError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Moneta {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "moneta::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, MonetaError>
    where
        Fut: core::future::Future<Output = Result<T, MonetaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(MonetaError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Moneta` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use moneta::{Moneta, MergeStrategy};
    ///
    /// let moneta = Moneta::builder()
    ///     .with_connector(Arc::new(moneta_mock::MockConnector::new()))
    ///     .with_regions(moneta_mock::mock_catalog())
    ///     .recession_source(moneta_mock::mock_recession_source())
    ///     .merge_strategy(MergeStrategy::Deep)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MonetaBuilder {
        MonetaBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MonetaConfig {
        &self.cfg
    }

    /// Regions with a configured spec, in code order.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }

    /// Source wiring for `region`, after unknown connectors were dropped.
    #[must_use]
    pub fn region_spec(&self, region: Region) -> Option<&RegionSpec> {
        self.regions.get(&region)
    }

    pub(crate) fn connector(&self, key: ConnectorKey) -> Option<&Arc<dyn MonetaConnector>> {
        self.connectors.iter().find(|c| c.name() == key.as_str())
    }
}
