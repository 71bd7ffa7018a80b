use moneta_core::{Capability, IndicatorInfo, MonetaError};

use crate::Moneta;
use crate::core::tag_err;
use crate::router::util::collapse_errors;

impl Moneta {
    /// List the indicators published by the first catalog provider that answers.
    ///
    /// Connectors advertising the capability are tried in registration order,
    /// each bounded by the per-provider timeout.
    ///
    /// # Errors
    /// Returns `Unsupported` if no connector lists indicators, otherwise the
    /// collapsed failures of every attempt (`AllProvidersTimedOut`, `NotFound`
    /// or `AllProvidersFailed`).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta::router::indicators", skip(self))
    )]
    pub async fn indicators(&self) -> Result<Vec<IndicatorInfo>, MonetaError> {
        let mut attempted_any = false;
        let mut errors = Vec::new();
        for c in &self.connectors {
            let Some(provider) = c.as_indicator_catalog_provider() else {
                continue;
            };
            attempted_any = true;
            let res = Self::provider_call_with_timeout(
                c.name(),
                Capability::Indicators.as_str(),
                self.cfg.provider_timeout,
                provider.indicators(),
            )
            .await;
            match res {
                Ok(list) => return Ok(list),
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }
        Err(collapse_errors(
            Capability::Indicators,
            attempted_any,
            errors,
            Some("indicator listing".to_string()),
        ))
    }
}
