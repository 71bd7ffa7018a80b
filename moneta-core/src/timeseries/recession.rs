use moneta_types::{Series, Span};

/// Extract contiguous recession periods from a 0/1 flag series.
///
/// Any non-zero value marks a recession month. A period starts at each date
/// where the flag turns on and ends at the first later date where it turns
/// off again, so `end` is the first month *after* the recession. When the
/// series finishes inside a recession the period is closed at the last date.
///
/// The input is expected in date order, as connectors return it.
///
/// ```
/// use chrono::NaiveDate;
/// use moneta_core::{recession_periods, Decimal, Observation, Series};
///
/// let d = |m: u32| NaiveDate::from_ymd_opt(2020, m, 1).unwrap();
/// let flags = [0, 1, 1, 0, 1];
/// let series = Series::new(
///     flags.iter().enumerate()
///         .map(|(i, f)| Observation::new(d(i as u32 + 1), Decimal::from(*f)))
///         .collect(),
/// );
/// let spans = recession_periods(&series);
/// assert_eq!(spans.len(), 2);
/// assert_eq!((spans[0].start, spans[0].end), (d(2), d(4)));
/// assert_eq!((spans[1].start, spans[1].end), (d(5), d(5)));
/// ```
#[must_use]
pub fn recession_periods(flags: &Series) -> Vec<Span> {
    let mut out = Vec::new();
    let mut start = None;
    for o in &flags.observations {
        let in_recession = !o.value.is_zero();
        match (start, in_recession) {
            (None, true) => start = Some(o.date),
            (Some(s), false) => {
                out.push(Span::new(s, o.date));
                start = None;
            }
            _ => {}
        }
    }
    if let (Some(s), Some(last)) = (start, flags.observations.last()) {
        out.push(Span::new(s, last.date));
    }
    out
}
