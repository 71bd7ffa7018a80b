use moneta::{Decimal, MergeStrategy, MonetaError, Region};

use crate::helpers::{d, mock_moneta};

#[tokio::test]
async fn growth_reports_year_over_year_change() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let report = moneta.region_frame(Region::Us).await.unwrap();
    let growth = moneta.growth(&report.frame).unwrap();

    assert_eq!(growth.columns(), ["m3", "gdp", "v"]);
    assert_eq!(growth.len(), report.frame.len());
    assert_eq!(growth.value(d(2000, 12), "m3"), None);
    // m3 2001-01 = 5300 against 5000 a year earlier.
    assert_eq!(growth.value(d(2001, 1), "m3"), Some(Decimal::new(6, 2)));
    // gdp 2001-01 = 10480 against 10000.
    assert_eq!(growth.value(d(2001, 1), "gdp"), Some(Decimal::new(48, 3)));
    assert_eq!(growth.first_valid_date("v"), Some(d(2001, 1)));
}

#[test]
fn growth_needs_frame_columns() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let frame = moneta::Frame::new(vec!["m3".into(), "recession".into()]);
    assert!(matches!(
        moneta.growth(&frame),
        Err(MonetaError::InvalidArg(_))
    ));
}
