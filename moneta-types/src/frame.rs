//! Column-oriented table over a shared, sorted date index.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MonetaError;

/// One dated row of a [`Frame`]; `values[i]` belongs to `columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRow {
    /// Row date.
    pub date: NaiveDate,
    /// Cell values; `None` marks a missing observation.
    pub values: Vec<Option<Decimal>>,
}

/// Named columns of optional values over a strictly increasing date index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<FrameRow>,
}

impl Frame {
    /// Empty frame with the given column names.
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a frame from prepared rows.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a row width differs from the column count, if
    /// column names repeat, or if dates are not strictly increasing.
    pub fn from_rows(columns: Vec<String>, rows: Vec<FrameRow>) -> Result<Self, MonetaError> {
        for (i, c) in columns.iter().enumerate() {
            if columns[..i].contains(c) {
                return Err(MonetaError::InvalidArg(format!("duplicate column '{c}'")));
            }
        }
        for r in &rows {
            if r.values.len() != columns.len() {
                return Err(MonetaError::InvalidArg(format!(
                    "row {} has {} values for {} columns",
                    r.date,
                    r.values.len(),
                    columns.len()
                )));
            }
        }
        if rows.windows(2).any(|w| w[0].date >= w[1].date) {
            return Err(MonetaError::InvalidArg(
                "frame dates must be strictly increasing".into(),
            ));
        }
        Ok(Self { columns, rows })
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in date order.
    #[must_use]
    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` among the columns.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// Cell at (`date`, `column`), if both exist and the cell is populated.
    #[must_use]
    pub fn value(&self, date: NaiveDate, column: &str) -> Option<Decimal> {
        let col = self.column_index(column)?;
        let row = self.rows.binary_search_by_key(&date, |r| r.date).ok()?;
        self.rows[row].values[col]
    }

    /// Append a column; `values` must line up with the existing rows.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the name already exists or the length differs.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<Decimal>>,
    ) -> Result<(), MonetaError> {
        let name = name.into();
        if self.column_index(&name).is_some() {
            return Err(MonetaError::InvalidArg(format!("duplicate column '{name}'")));
        }
        if values.len() != self.rows.len() {
            return Err(MonetaError::InvalidArg(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.values.push(v);
        }
        self.columns.push(name);
        Ok(())
    }

    /// Append `name = numerator / denominator`, row by row.
    ///
    /// A cell is `None` when either operand is missing or the denominator is zero.
    ///
    /// # Errors
    /// Returns `InvalidArg` if an operand column does not exist or `name` is taken.
    pub fn derive_ratio(
        &mut self,
        name: impl Into<String>,
        numerator: &str,
        denominator: &str,
    ) -> Result<(), MonetaError> {
        let num = self
            .column_index(numerator)
            .ok_or_else(|| MonetaError::InvalidArg(format!("unknown column '{numerator}'")))?;
        let den = self
            .column_index(denominator)
            .ok_or_else(|| MonetaError::InvalidArg(format!("unknown column '{denominator}'")))?;
        let values = self
            .rows
            .iter()
            .map(|r| match (r.values[num], r.values[den]) {
                (Some(n), Some(d)) => n.checked_div(d),
                _ => None,
            })
            .collect();
        self.push_column(name, values)
    }

    /// Earliest date at which `column` holds a value.
    #[must_use]
    pub fn first_valid_date(&self, column: &str) -> Option<NaiveDate> {
        let col = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.values[col].is_some())
            .map(|r| r.date)
    }

    /// Drop rows dated before `start`.
    #[must_use]
    pub fn since(mut self, start: NaiveDate) -> Self {
        self.rows.retain(|r| r.date >= start);
        self
    }

    /// Project onto a subset of columns, in the order given.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a requested column does not exist.
    pub fn select(&self, columns: &[&str]) -> Result<Self, MonetaError> {
        let idx: Vec<usize> = columns
            .iter()
            .map(|c| {
                self.column_index(c)
                    .ok_or_else(|| MonetaError::InvalidArg(format!("unknown column '{c}'")))
            })
            .collect::<Result<_, _>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| FrameRow {
                date: r.date,
                values: idx.iter().map(|&i| r.values[i]).collect(),
            })
            .collect();
        Ok(Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        })
    }
}
