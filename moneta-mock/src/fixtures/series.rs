use chrono::NaiveDate;
use moneta_core::{Decimal, Frequency, Observation, Series, SeriesMeta, shift_months};

// Recession months flagged in the USREC fixture, inclusive.
const RECESSIONS: &[((i32, u32), (i32, u32))] = &[
    ((2001, 4), (2001, 11)),
    ((2008, 1), (2009, 6)),
    ((2020, 3), (2020, 4)),
];

pub fn by_id(id: &str) -> Option<Series> {
    match id {
        "M3" => Some(with_meta(
            monthly(2000, 288, |i| Decimal::from(5000 + 25 * i)),
            "Mock broad money",
            Frequency::Monthly,
        )),
        // Older vintage covering earlier years, used as a backfill source.
        "M3-LEGACY" => Some(with_meta(
            monthly(1990, 144, |i| Decimal::from(3000 + 15 * i)),
            "Mock broad money (legacy)",
            Frequency::Monthly,
        )),
        "GDP" => Some(with_meta(
            stepped(2000, 96, 3, |i| Decimal::from(10_000 + 120 * i)),
            "Mock nominal GDP",
            Frequency::Quarterly,
        )),
        "CPI" => Some(with_meta(
            monthly(2000, 288, |i| Decimal::new(1000 + 2 * i, 1)),
            "Mock consumer prices",
            Frequency::Monthly,
        )),
        "USREC" => Some(with_meta(
            monthly(2000, 288, recession_flag),
            "Mock recession indicator",
            Frequency::Monthly,
        )),
        "EMPTY" => Some(Series::default()),
        _ => None,
    }
}

fn month(index: i64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1)?;
    shift_months(base, i32::try_from(index).ok()?)
}

fn recession_flag(index: i64) -> Decimal {
    let Some(date) = month(index) else {
        return Decimal::ZERO;
    };
    let on = RECESSIONS.iter().any(|&((sy, sm), (ey, em))| {
        let start = NaiveDate::from_ymd_opt(sy, sm, 1);
        let end = NaiveDate::from_ymd_opt(ey, em, 1);
        matches!((start, end), (Some(s), Some(e)) if s <= date && date <= e)
    });
    if on { Decimal::ONE } else { Decimal::ZERO }
}

fn monthly(first_year: i32, count: i64, value: impl Fn(i64) -> Decimal) -> Series {
    stepped(first_year, count, 1, value)
}

fn stepped(first_year: i32, count: i64, step: i32, value: impl Fn(i64) -> Decimal) -> Series {
    let observations = NaiveDate::from_ymd_opt(first_year, 1, 1)
        .map(|base| {
            (0..count)
                .filter_map(|i| {
                    let offset = i32::try_from(i).ok()?.checked_mul(step)?;
                    shift_months(base, offset).map(|d| Observation::new(d, value(i)))
                })
                .collect()
        })
        .unwrap_or_default();
    Series::new(observations)
}

fn with_meta(mut series: Series, title: &str, frequency: Frequency) -> Series {
    series.meta = Some(SeriesMeta {
        title: Some(title.to_string()),
        units: None,
        frequency: Some(frequency),
    });
    series
}
