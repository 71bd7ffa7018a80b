use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use moneta_core::connector::{ConnectorKey, MonetaConnector, ObservationProvider};
use moneta_core::{MonetaError, Series, SeriesRequest};

use crate::parse::{CsvLayout, read_observations};

#[derive(Debug, Clone)]
struct CsvFile {
    path: PathBuf,
    layout: CsvLayout,
}

/// Serves series from CSV files downloaded ahead of time.
///
/// Each series id is registered with a file (relative to the data directory)
/// and the layout needed to read it. Files are re-read on every request.
#[derive(Debug, Clone)]
pub struct CsvFileConnector {
    root: PathBuf,
    files: BTreeMap<String, CsvFile>,
}

impl CsvFileConnector {
    /// Static connector key for region catalogs.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneta-csv");

    /// Connector resolving relative file paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    /// Register `id` as the file at `path` laid out as `layout`.
    #[must_use]
    pub fn with_file(
        mut self,
        id: impl Into<String>,
        path: impl Into<PathBuf>,
        layout: CsvLayout,
    ) -> Self {
        self.files.insert(
            id.into(),
            CsvFile {
                path: path.into(),
                layout,
            },
        );
        self
    }
}

#[async_trait]
impl ObservationProvider for CsvFileConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "moneta_sources::csv::observations", skip(self), fields(id = %req.id))
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let file = self
            .files
            .get(&req.id)
            .ok_or_else(|| MonetaError::not_found(format!("csv series {}", req.id)))?;
        let path = self.root.join(&file.path);
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MonetaError::not_found(format!("file {}", path.display()))
            } else {
                MonetaError::io(path.display().to_string(), e)
            }
        })?;
        let mut observations = read_observations(&text, &file.layout).map_err(|e| {
            MonetaError::connector(Self::KEY.as_str(), format!("{}: {e}", path.display()))
        })?;
        if let Some(start) = req.start {
            observations.retain(|o| o.date >= start);
        }
        Ok(Series::new(observations))
    }
}

impl MonetaConnector for CsvFileConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Local files"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }
}
