use std::path::{Path, PathBuf};

use moneta::{MonetaConfig, MonetaError, SourcesConfig};
use serde::{Deserialize, Serialize};

/// Settings read from the optional TOML file.
///
/// ```toml
/// [moneta]
/// merge_strategy = "fallback"
/// provider_timeout = 20
/// start = "1990-01-01"
///
/// [sources]
/// data_dir = "data"
/// fred_api_key = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub moneta: MonetaConfig,
    pub sources: SourcesConfig,
}

impl CliConfig {
    /// Read `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, MonetaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| MonetaError::io(path.display().to_string(), e))?;
        Self::from_toml(&text)
            .map_err(|e| MonetaError::InvalidArg(format!("{}: {e}", path.display())))
    }

    fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Command-line and environment values win over the file.
    pub fn apply_overrides(&mut self, data_dir: Option<PathBuf>, fred_api_key: Option<String>) {
        if let Some(dir) = data_dir {
            self.sources.data_dir = dir;
        }
        if let Some(key) = fred_api_key.filter(|k| !k.trim().is_empty()) {
            self.sources.fred_api_key = Some(key);
        }
    }
}
