use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use moneta_types::{Decimal, Frequency, Observation, Series, SeriesMeta};

/// First day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Shift a date by a signed number of calendar months.
///
/// Returns `None` when the result falls outside chrono's supported range.
#[must_use]
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let n = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(n)
    } else {
        date.checked_sub_months(n)
    }
}

/// Resample a series onto a contiguous month-start calendar, forward-filling gaps.
///
/// - Observations are bucketed by calendar month; the latest observation in a
///   month wins and is labelled with the first day of that month.
/// - The output covers every month from the first bucket to the last one.
///   Months without an observation repeat the previous value.
/// - A quarterly series dated at quarter starts therefore expands each quarter
///   into three months, except the final quarter which only contributes the
///   month it is dated in.
///
/// Already-monthly series dated at month starts pass through unchanged, so the
/// function is idempotent. Metadata is kept with the frequency set to monthly.
#[must_use]
pub fn resample_to_monthly(series: Series) -> Series {
    let Series {
        mut observations,
        meta,
    } = series;
    if observations.is_empty() {
        return Series {
            observations,
            meta,
        };
    }

    observations.sort_by_key(|o| o.date);
    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for o in observations {
        buckets.insert(month_start(o.date), o.value);
    }

    let observed = buckets.len();
    let mut out: Vec<Observation> = Vec::with_capacity(observed);
    let mut iter = buckets.into_iter().peekable();
    while let Some((month, value)) = iter.next() {
        out.push(Observation::new(month, value));
        let Some(&(next_month, _)) = iter.peek() else {
            break;
        };
        let mut fill = shift_months(month, 1);
        while let Some(m) = fill
            && m < next_month
        {
            out.push(Observation::new(m, value));
            fill = shift_months(m, 1);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        observed,
        filled = out.len() - observed,
        "resampled series to month starts"
    );

    let meta = Some(SeriesMeta {
        frequency: Some(Frequency::Monthly),
        ..meta.unwrap_or_default()
    });
    Series {
        observations: out,
        meta,
    }
}
