use std::sync::Arc;

use async_trait::async_trait;
use moneta_core::MonetaError;
use url::Url;

/// Minimal HTTP surface the connectors need (so we can inject mocks in tests).
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and return the response body as text.
    ///
    /// `accept` is sent as the `Accept` header. A 404 maps to `NotFound`,
    /// any other non-success status or transport failure to `Other`.
    async fn get_text(&self, url: &Url, accept: &str) -> Result<String, MonetaError>;
}

/// Real adapter backed by a single `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// Build a client sending `user_agent` with every request.
    ///
    /// # Errors
    /// Returns `Other` if the TLS backend or the header value is rejected.
    pub fn new(user_agent: &str) -> Result<Self, MonetaError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| MonetaError::Other(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for RealAdapter {
    async fn get_text(&self, url: &Url, accept: &str) -> Result<String, MonetaError> {
        let resp = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| MonetaError::Other(e.to_string()))?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MonetaError::not_found(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(MonetaError::Other(format!("status {status}: {}", url.path())));
        }
        resp.text()
            .await
            .map_err(|e| MonetaError::Other(e.to_string()))
    }
}

impl dyn HttpFetch {
    /// Build an `HttpFetch` from a closure receiving the URL and `Accept` value (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn HttpFetch>
    where
        F: Send + Sync + 'static + Fn(Url, String) -> Result<String, MonetaError>,
    {
        struct FnFetch<F>(F);
        #[async_trait]
        impl<F> HttpFetch for FnFetch<F>
        where
            F: Send + Sync + 'static + Fn(Url, String) -> Result<String, MonetaError>,
        {
            async fn get_text(&self, url: &Url, accept: &str) -> Result<String, MonetaError> {
                (self.0)(url.clone(), accept.to_string())
            }
        }
        Arc::new(FnFetch(f))
    }
}

/// Tag adapter failures with the connector that issued the request.
///
/// `NotFound` is kept as-is (rephrased with `what`); everything else becomes a
/// `Connector` error so the orchestrator can attribute it.
pub(crate) fn normalize_error(e: MonetaError, connector: &'static str, what: &str) -> MonetaError {
    match e {
        MonetaError::NotFound { .. } => MonetaError::not_found(what.to_string()),
        MonetaError::Other(msg) | MonetaError::Data(msg) => {
            MonetaError::connector(connector, format!("{what}: {msg}"))
        }
        MonetaError::Connector { msg, .. } => MonetaError::connector(connector, msg),
        other => other,
    }
}

/// Parse a configured base URL, joining `segments` as path components.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, MonetaError> {
    let mut url = Url::parse(base)
        .map_err(|e| MonetaError::InvalidArg(format!("invalid base url '{base}': {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| MonetaError::InvalidArg(format!("base url '{base}' cannot be a base")))?;
        path.pop_if_empty();
        for s in segments {
            path.push(s);
        }
    }
    Ok(url)
}
