use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;
use moneta_types::{Decimal, Frame, FrameRow, MonetaError, Series, SeriesMeta};

/// Merge several series for the same indicator in priority order (first is highest).
///
/// - Observations are keyed by date; the first appearance wins for duplicates,
///   so lower-priority series only backfill dates the others do not cover.
/// - Observations are returned sorted by date.
/// - `meta`: first series with metadata that contributed at least one
///   observation wins; otherwise the first non-None overall.
#[must_use]
pub fn merge_series_by_priority<I>(series: I) -> Series
where
    I: IntoIterator<Item = Series>,
{
    let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut meta: Option<SeriesMeta> = None;
    let mut fallback_meta: Option<SeriesMeta> = None;

    for s in series {
        let mut contributed = false;
        for o in s.observations {
            if let Entry::Vacant(v) = map.entry(o.date) {
                v.insert(o.value);
                contributed = true;
            }
        }
        if contributed && meta.is_none() {
            meta = s.meta;
        } else if fallback_meta.is_none() {
            fallback_meta = s.meta;
        }
    }

    let empty = map.is_empty();
    Series {
        observations: map
            .into_iter()
            .map(|(date, value)| moneta_types::Observation::new(date, value))
            .collect(),
        meta: if meta.is_none() && empty {
            fallback_meta
        } else {
            meta
        },
    }
}

/// Outer-join named series into a frame over the chronological union of their dates.
///
/// A column holds `None` at every date its series does not cover. If a series
/// repeats a date, its first observation for that date is used. Column order
/// follows the input order.
///
/// # Errors
/// Returns `InvalidArg` if two inputs share a column name.
pub fn outer_join<I, S>(columns: I) -> Result<Frame, MonetaError>
where
    I: IntoIterator<Item = (S, Series)>,
    S: Into<String>,
{
    let inputs: Vec<(String, Series)> = columns.into_iter().map(|(n, s)| (n.into(), s)).collect();
    let width = inputs.len();

    let mut grid: BTreeMap<NaiveDate, Vec<Option<Decimal>>> = BTreeMap::new();
    for (col, (_, series)) in inputs.iter().enumerate() {
        for o in &series.observations {
            let row = grid.entry(o.date).or_insert_with(|| vec![None; width]);
            if row[col].is_none() {
                row[col] = Some(o.value);
            }
        }
    }

    let names: Vec<String> = inputs.into_iter().map(|(n, _)| n).collect();
    let rows = grid
        .into_iter()
        .map(|(date, values)| FrameRow { date, values })
        .collect();
    Frame::from_rows(names, rows)
}
