use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use moneta_types::{Frequency, Series};

/// Typical spacing, in days, between consecutive distinct dates of `series`.
///
/// The most common gap wins. When several gaps are equally common the lower
/// median of all gaps is used, so the answer is always a gap that occurs.
///
/// Monthly data (gaps of 28 to 31 days, mostly 31):
///
/// ```
/// use chrono::NaiveDate;
/// use moneta_core::{estimate_step_days, Decimal, Observation, Series};
///
/// let obs = |m: u32| Observation::new(NaiveDate::from_ymd_opt(2021, m, 1).unwrap(), Decimal::ONE);
/// let series = Series::new((1..=12).map(obs).collect());
/// assert_eq!(estimate_step_days(&series), Some(31));
/// ```
///
/// Order and repeated dates are irrelevant. `None` with fewer than two
/// distinct dates.
#[must_use]
pub fn estimate_step_days(series: &Series) -> Option<i64> {
    let dates: BTreeSet<NaiveDate> = series.observations.iter().map(|o| o.date).collect();
    let mut gaps: Vec<i64> = dates
        .iter()
        .zip(dates.iter().skip(1))
        .map(|(a, b)| (*b - *a).num_days())
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_unstable();

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &g in &gaps {
        *counts.entry(g).or_default() += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    let mut modes = counts.iter().filter(|&(_, &n)| n == top).map(|(&g, _)| g);
    match (modes.next(), modes.next()) {
        (Some(only), None) => Some(only),
        _ => Some(gaps[(gaps.len() - 1) / 2]),
    }
}

/// Classify the cadence of a series.
///
/// Uses the metadata frequency when the source reported one, otherwise the
/// step estimated by [`estimate_step_days`].
#[must_use]
pub fn infer_frequency(series: &Series) -> Option<Frequency> {
    if let Some(f) = series.meta.as_ref().and_then(|m| m.frequency) {
        return Some(f);
    }
    estimate_step_days(series).map(Frequency::from_step_days)
}
