use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type shared by connectors, the orchestrator and the CLI.
///
/// Single-source failures carry the connector that produced them; fetches that
/// consult several sources collapse into one of the aggregate variants.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonetaError {
    /// No connector (or no configured source) offers what was asked for.
    #[error("not supported: {capability}")]
    Unsupported {
        /// Capability label, e.g. `observations` or `observations for ch/gdp`.
        capability: String,
    },

    /// A payload could not be read: bad dates, missing columns, malformed numbers.
    #[error("bad data: {0}")]
    Data(String),

    /// Caller input was rejected before anything was fetched.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Failure reported by one connector.
    #[error("{connector}: {msg}")]
    Connector {
        /// Connector key, e.g. `moneta-ecb`.
        connector: String,
        /// What went wrong.
        msg: String,
    },

    /// Anything the other variants do not describe.
    #[error("{0}")]
    Other(String),

    /// A series, file, region or connector does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// The missing thing, e.g. `series USREC` or `region jp`.
        what: String,
    },

    /// Every source of a series failed; one entry per failing source.
    #[error("every source failed: {0:?}")]
    AllProvidersFailed(Vec<MonetaError>),

    /// One connector did not answer within the provider timeout.
    #[error("{connector} timed out ({capability})")]
    ProviderTimeout {
        /// Connector key.
        connector: String,
        /// Capability label of the call.
        capability: String,
    },

    /// A whole region frame (or series fetch) overran the request deadline.
    #[error("deadline exceeded: {capability}")]
    RequestTimeout {
        /// Capability label of the request.
        capability: String,
    },

    /// Every source was tried and every one timed out.
    #[error("every source timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label of the request.
        capability: String,
    },

    /// Reading or writing a local file failed.
    #[error("i/o error on {path}: {msg}")]
    Io {
        /// Path of the file involved.
        path: String,
        /// Underlying error message.
        msg: String,
    },
}

impl MonetaError {
    /// `Unsupported` for a capability label.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// `Connector` error attributed to `connector`.
    pub fn connector(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: name.into(),
            msg: msg.into(),
        }
    }

    /// `NotFound` for a description of the missing thing.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// `ProviderTimeout` for a connector and capability.
    pub fn provider_timeout(name: impl Into<String>, cap: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: name.into(),
            capability: cap.into(),
        }
    }

    /// `RequestTimeout` for a capability.
    pub fn request_timeout(cap: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: cap.into(),
        }
    }

    /// `Io` error from a path and any displayable cause.
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            msg: err.to_string(),
        }
    }

    /// Whether a user can do something about this error.
    ///
    /// Missing data and unsupported capabilities are expected while sources
    /// are being wired up; an aggregate is actionable if any member is.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } => false,
            Self::AllProvidersFailed(errors) => errors.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// The individual failures behind an aggregate, nested aggregates included.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(errors) => {
                errors.into_iter().flat_map(Self::flatten).collect()
            }
            single => vec![single],
        }
    }
}

impl From<csv::Error> for MonetaError {
    fn from(e: csv::Error) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<rust_decimal::Error> for MonetaError {
    fn from(e: rust_decimal::Error) -> Self {
        Self::Data(e.to_string())
    }
}
