//! Jurisdictions, indicators and sampling frequencies.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonetaError;

/// Jurisdiction whose monetary aggregates are analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States.
    Us,
    /// Euro area.
    Eu,
    /// Switzerland.
    Ch,
    /// United Kingdom.
    Uk,
    /// Japan.
    Jp,
}

impl Region {
    /// Every supported region in catalog order.
    pub const ALL: [Self; 5] = [Self::Us, Self::Eu, Self::Ch, Self::Uk, Self::Jp];

    /// Stable lowercase code used on the command line and in file names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Ch => "ch",
            Self::Uk => "uk",
            Self::Jp => "jp",
        }
    }

    /// Human-readable name, used as a chart or report title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Us => "United States",
            Self::Eu => "Euro Area",
            Self::Ch => "Switzerland",
            Self::Uk => "United Kingdom",
            Self::Jp => "Japan",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = MonetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == needle)
            .ok_or_else(|| MonetaError::InvalidArg(format!("unknown region '{s}'")))
    }
}

/// Macroeconomic indicator fetched per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Broad money supply (M3, or the closest national aggregate).
    M3,
    /// Nominal gross domestic product.
    Gdp,
    /// Consumer price index.
    Cpi,
}

impl Indicator {
    /// Every indicator, in frame column order.
    pub const ALL: [Self; 3] = [Self::M3, Self::Gdp, Self::Cpi];

    /// Column name in aligned frames.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::M3 => "m3",
            Self::Gdp => "gdp",
            Self::Cpi => "cpi",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Native sampling frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One observation per calendar month.
    Monthly,
    /// One observation per calendar quarter.
    Quarterly,
    /// One observation per calendar year.
    Annual,
    /// Any other cadence, expressed as a representative step in days.
    Other(i64),
}

impl Frequency {
    /// Classify a representative step between observations, in days.
    #[must_use]
    pub const fn from_step_days(days: i64) -> Self {
        match days {
            28..=31 => Self::Monthly,
            89..=92 => Self::Quarterly,
            365 | 366 => Self::Annual,
            other => Self::Other(other),
        }
    }
}
