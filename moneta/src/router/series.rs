use std::collections::BTreeMap;

use chrono::NaiveDate;
use moneta_core::{
    Attribution, Capability, Indicator, MergeStrategy, MonetaError, Region, Series, SeriesSource,
    Span, merge_series_by_priority, resample_to_monthly, shift_months,
};

use crate::Moneta;
use crate::core::{tag_err, with_request_deadline};

type SourceTaskResult = (usize, &'static str, Result<Series, MonetaError>);
type SourceOk = (usize, &'static str, Series);
type CollectedSources = (Vec<SourceOk>, Vec<MonetaError>);

/// A merged, month-aligned series together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergedSeries {
    pub(crate) series: Series,
    pub(crate) attribution: Attribution,
    /// Failures of sources that did not prevent the merge.
    pub(crate) warnings: Vec<MonetaError>,
}

impl Moneta {
    /// Fetch one series from the connector the source names.
    ///
    /// The call is bounded by the per-provider timeout. The series is returned
    /// exactly as the connector produced it (no monthly alignment).
    ///
    /// # Errors
    /// Returns `NotFound` if the connector is not registered, `ProviderTimeout`
    /// if it is too slow, and otherwise the connector's error tagged with its name.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "moneta::router::series",
            skip(self, source),
            fields(source = %source.label()),
        )
    )]
    pub async fn series(&self, source: &SeriesSource) -> Result<Series, MonetaError> {
        let name = source.connector.as_str();
        let connector = self
            .connector(source.connector)
            .ok_or_else(|| MonetaError::not_found(format!("connector {name}")))?;
        let provider = connector
            .as_observation_provider()
            .ok_or_else(|| tag_err(name, MonetaError::unsupported(Capability::Observations)))?;
        Self::provider_call_with_timeout(
            name,
            Capability::Observations.as_str(),
            self.cfg.provider_timeout,
            provider.observations(&source.request),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    /// Fetch an indicator of a region from its configured sources and merge them.
    ///
    /// Behavior and trade-offs:
    /// - Every source is aligned to month starts before merging.
    /// - `Deep` fetches all sources concurrently; higher-priority sources win on
    ///   shared months and lower-priority ones backfill the rest.
    /// - `Fallback` tries sources in order and stops at the first non-empty one;
    ///   empty-but-OK responses let the search continue.
    /// - The [`Attribution`] lists contiguous monthly spans per connector,
    ///   labelled `"<region>/<column>"`.
    /// - On overall failure, returns `NotFound` only when no source reported
    ///   anything but `NotFound` or empty data. If every attempt timed out,
    ///   returns `AllProvidersTimedOut`; otherwise `AllProvidersFailed`.
    ///
    /// # Errors
    /// Returns an error if the region is not configured, has no sources for the
    /// indicator, no source succeeds, or the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "moneta::router::indicator_series",
            skip(self),
            fields(region = %region, indicator = %indicator),
        )
    )]
    pub async fn indicator_series(
        &self,
        region: Region,
        indicator: Indicator,
    ) -> Result<(Series, Attribution), MonetaError> {
        let merged = with_request_deadline(
            self.cfg.request_timeout,
            self.fetch_indicator(region, indicator),
        )
        .await
        .map_err(|_| MonetaError::request_timeout(Capability::Observations))??;
        #[cfg(feature = "tracing")]
        for w in &merged.warnings {
            tracing::warn!(error = %w, "backfill source failed");
        }
        Ok((merged.series, merged.attribution))
    }

    /// Month-aligned recession flag series (non-zero means recession).
    ///
    /// # Errors
    /// Returns `Unsupported` if no recession source is configured, otherwise
    /// whatever [`series`](Self::series) returns for it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta::router::recession_flags", skip(self))
    )]
    pub async fn recession_flags(&self) -> Result<Series, MonetaError> {
        let source = self
            .recession
            .as_ref()
            .ok_or_else(|| MonetaError::unsupported(Capability::RecessionFlags))?;
        Ok(resample_to_monthly(self.series(source).await?))
    }

    /// Contiguous recession periods derived from [`recession_flags`](Self::recession_flags).
    ///
    /// # Errors
    /// Same as [`recession_flags`](Self::recession_flags).
    pub async fn recession_periods(&self) -> Result<Vec<Span>, MonetaError> {
        let flags = self.recession_flags().await?;
        Ok(moneta_core::recession_periods(&flags))
    }

    pub(crate) async fn fetch_indicator(
        &self,
        region: Region,
        indicator: Indicator,
    ) -> Result<MergedSeries, MonetaError> {
        let spec = self
            .regions
            .get(&region)
            .ok_or_else(|| MonetaError::not_found(format!("region {region}")))?;
        let sources = spec.sources_for(indicator);
        if sources.is_empty() {
            return Err(MonetaError::unsupported(format!(
                "{} for {region}/{indicator}",
                Capability::Observations
            )));
        }
        let joined = match self.cfg.merge_strategy {
            MergeStrategy::Deep => self.parallel_sources(sources).await,
            MergeStrategy::Fallback => self.sequential_sources(sources).await,
        };
        Self::finalize_sources(joined, &format!("{region}/{indicator}"))
    }

    /// Fetch the recession flag as a frame column labelled `"<region>/recession"`.
    pub(crate) async fn fetch_recession(&self, region: Region) -> Result<MergedSeries, MonetaError> {
        let source = self
            .recession
            .as_ref()
            .ok_or_else(|| MonetaError::unsupported(Capability::RecessionFlags))?;
        let joined = vec![(0, source.connector.as_str(), self.series(source).await)];
        Self::finalize_sources(joined, &format!("{region}/recession"))
    }

    async fn parallel_sources(&self, sources: &[SeriesSource]) -> Vec<SourceTaskResult> {
        let tasks = sources.iter().enumerate().map(|(idx, s)| async move {
            (idx, s.connector.as_str(), self.series(s).await)
        });
        futures::future::join_all(tasks).await
    }

    async fn sequential_sources(&self, sources: &[SeriesSource]) -> Vec<SourceTaskResult> {
        let mut out = Vec::with_capacity(sources.len());
        for (idx, s) in sources.iter().enumerate() {
            let res = self.series(s).await;
            let found = matches!(&res, Ok(series) if !series.is_empty());
            out.push((idx, s.connector.as_str(), res));
            if found {
                break;
            }
        }
        out
    }

    fn collect_successes(joined: Vec<SourceTaskResult>) -> CollectedSources {
        let mut ok: Vec<SourceOk> = Vec::new();
        let mut errors: Vec<MonetaError> = Vec::new();
        for (idx, name, res) in joined {
            match res {
                Ok(series) if !series.is_empty() => ok.push((idx, name, series)),
                Ok(_) | Err(MonetaError::NotFound { .. }) => {}
                Err(e) => errors.push(tag_err(name, e)),
            }
        }
        (ok, errors)
    }

    fn finalize_sources(
        joined: Vec<SourceTaskResult>,
        label: &str,
    ) -> Result<MergedSeries, MonetaError> {
        let attempts = joined.len();
        let (mut ok, errors) = Self::collect_successes(joined);
        if ok.is_empty() {
            if errors.is_empty() {
                return Err(MonetaError::not_found(label.to_string()));
            }
            if errors.len() == attempts
                && errors
                    .iter()
                    .all(|e| matches!(e, MonetaError::ProviderTimeout { .. }))
            {
                return Err(MonetaError::AllProvidersTimedOut {
                    capability: Capability::Observations.to_string(),
                });
            }
            return Err(MonetaError::AllProvidersFailed(errors));
        }

        ok.sort_by_key(|(idx, _, _)| *idx);
        let results: Vec<(&'static str, Series)> = ok
            .into_iter()
            .map(|(_, name, series)| (name, resample_to_monthly(series)))
            .collect();
        let attribution = Self::build_attribution(&results, label);
        let series = merge_series_by_priority(results.into_iter().map(|(_, s)| s));
        Ok(MergedSeries {
            series,
            attribution,
            warnings: errors,
        })
    }

    fn build_attribution(results: &[(&'static str, Series)], label: &str) -> Attribution {
        let mut owner: BTreeMap<NaiveDate, &'static str> = BTreeMap::new();
        for (name, series) in results {
            for o in &series.observations {
                owner.entry(o.date).or_insert(*name);
            }
        }

        let mut attr = Attribution::new(label.to_string());
        let mut run: Option<(&'static str, NaiveDate, NaiveDate)> = None;
        for (date, name) in owner {
            run = match run {
                Some((n, start, end)) if n == name && shift_months(end, 1) == Some(date) => {
                    Some((n, start, date))
                }
                Some((n, start, end)) => {
                    attr.push(n, Span::new(start, end));
                    Some((name, date, date))
                }
                None => Some((name, date, date)),
            };
        }
        if let Some((n, start, end)) = run {
            attr.push(n, Span::new(start, end));
        }
        attr
    }
}
