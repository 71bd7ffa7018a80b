//! Date spans and attribution of merged series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A continuous range of dates `[start..=end]`.
///
/// Used both for recession periods and for recording which connector
/// supplied which stretch of a merged series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Inclusive end date.
    pub end: NaiveDate,
}

impl Span {
    /// Build a span; callers guarantee `start <= end`.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the span.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Attribution of a merged series: which connector supplied which date spans.
///
/// Behavior:
/// - Built while merging the configured sources of one indicator, by walking the
///   de-duplicated dates and emitting a span whenever the contributing
///   connector changes.
/// - Useful for debugging merge decisions and source coverage over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Column or series the attribution refers to (e.g. "us/m3").
    pub series: String,
    /// Collected spans annotated by connector name.
    pub spans: Vec<(String, Span)>,
}

impl Attribution {
    /// Create a new attribution container for a series label.
    #[must_use]
    pub const fn new(series: String) -> Self {
        Self {
            series,
            spans: vec![],
        }
    }

    /// Record a connector span contribution.
    pub fn push(&mut self, connector: impl Into<String>, span: Span) {
        self.spans.push((connector.into(), span));
    }
}
