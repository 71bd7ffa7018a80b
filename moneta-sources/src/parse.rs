use chrono::NaiveDate;
use moneta_core::{Decimal, MonetaError, Observation};

/// Reference to a CSV column, by header name or zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Header name; requires a header row.
    Name(String),
    /// Zero-based field position.
    Index(usize),
}

impl Column {
    /// Column by header name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    fn resolve(&self, headers: Option<&csv::StringRecord>) -> Result<usize, MonetaError> {
        match self {
            Self::Index(i) => Ok(*i),
            Self::Name(n) => headers
                .and_then(|h| h.iter().position(|c| c.trim() == n))
                .ok_or_else(|| MonetaError::Data(format!("missing column '{n}'"))),
        }
    }
}

/// How a source lays out a two-column (date, value) CSV series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    /// Field separator.
    pub delimiter: u8,
    /// Lines to discard before the header (or first record).
    pub skip_rows: usize,
    /// Whether the first kept line is a header row.
    pub has_headers: bool,
    /// Date column.
    pub date: Column,
    /// Value column.
    pub value: Column,
    /// Explicit chrono format for dates; the day defaults to 1 when absent.
    pub date_format: Option<String>,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
            has_headers: true,
            date: Column::name("Date"),
            value: Column::name("Value"),
            date_format: None,
        }
    }
}

impl CsvLayout {
    /// Headed CSV reading `date` and `value` by name.
    pub fn named(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: Column::Name(date.into()),
            value: Column::Name(value.into()),
            ..Self::default()
        }
    }

    /// Header-less CSV with the date in the first field and the value in the second.
    #[must_use]
    pub fn positional() -> Self {
        Self {
            has_headers: false,
            date: Column::Index(0),
            value: Column::Index(1),
            ..Self::default()
        }
    }

    /// Use `delimiter` as the field separator.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Discard the first `n` lines.
    #[must_use]
    pub const fn skip_rows(mut self, n: usize) -> Self {
        self.skip_rows = n;
        self
    }

    /// Parse dates with an explicit chrono format.
    #[must_use]
    pub fn date_format(mut self, fmt: impl Into<String>) -> Self {
        self.date_format = Some(fmt.into());
        self
    }
}

const MISSING: [&str; 5] = ["", ".", "NA", "NaN", "N/A"];

/// Parse a numeric cell; missing-value markers yield `Ok(None)`.
///
/// # Errors
/// Returns `Data` when the cell is neither a number nor a missing marker.
pub fn parse_value(raw: &str) -> Result<Option<Decimal>, MonetaError> {
    let s = raw.trim();
    if MISSING.iter().any(|m| m.eq_ignore_ascii_case(s)) {
        return Ok(None);
    }
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map(Some)
        .map_err(|_| MonetaError::Data(format!("invalid number '{raw}'")))
}

fn with_day_one(s: &str, fmt: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, fmt)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{s}|01"), &format!("{fmt}|%d")).ok())
}

fn parse_quarter(s: &str) -> Option<NaiveDate> {
    let (year, q) = s.split_once(['Q', 'q'])?;
    let year: i32 = year.trim_end_matches(['-', ' ']).parse().ok()?;
    let q: u32 = q.trim().parse().ok()?;
    if !(1..=4).contains(&q) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, (q - 1) * 3 + 1, 1)
}

/// Parse a period label into the first day it covers.
///
/// With `format`, only that chrono format is tried (the day defaults to 1).
/// Otherwise the labels the sources publish are recognised:
/// `2020-03-31`, `2020-03`, `2020/03`, `31 Mar 2020`, `2020-Q1`, `2020Q1`,
/// `2020 Q1`, `2020 MAR` and `2020`.
///
/// # Errors
/// Returns `Data` when no format matches.
pub fn parse_period(raw: &str, format: Option<&str>) -> Result<NaiveDate, MonetaError> {
    let s = raw.trim();
    let parsed = match format {
        Some(fmt) => with_day_one(s, fmt),
        None => ["%Y-%m-%d", "%d %b %Y", "%Y-%m", "%Y/%m", "%Y %b"]
            .iter()
            .find_map(|fmt| with_day_one(s, fmt))
            .or_else(|| parse_quarter(s))
            .or_else(|| {
                (s.len() == 4)
                    .then(|| s.parse::<i32>().ok())
                    .flatten()
                    .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            }),
    };
    parsed.ok_or_else(|| MonetaError::Data(format!("unrecognised date '{raw}'")))
}

/// Read `(date, value)` observations from CSV text laid out as `layout`.
///
/// Rows with a missing value are skipped. The result is sorted by date.
///
/// # Errors
/// Returns `Data` for unknown columns, short rows, unparseable dates or values.
pub fn read_observations(text: &str, layout: &CsvLayout) -> Result<Vec<Observation>, MonetaError> {
    let text = text.trim_start_matches('\u{feff}');
    let body: String = text.split_inclusive('\n').skip(layout.skip_rows).collect();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(layout.delimiter)
        .has_headers(layout.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = if layout.has_headers {
        Some(reader.headers()?.clone())
    } else {
        None
    };
    let date_col = layout.date.resolve(headers.as_ref())?;
    let value_col = layout.value.resolve(headers.as_ref())?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let field = |i: usize| {
            record.get(i).ok_or_else(|| {
                MonetaError::Data(format!(
                    "line {}: no field {i}",
                    record.position().map_or(0, csv::Position::line)
                ))
            })
        };
        let Some(value) = parse_value(field(value_col)?)? else {
            continue;
        };
        let date = parse_period(field(date_col)?, layout.date_format.as_deref())?;
        out.push(Observation::new(date, value));
    }
    out.sort_by_key(|o| o.date);
    Ok(out)
}
