use moneta::{Indicator, MergeStrategy, Moneta, Region, RegionSpec, Series};
use moneta_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{d, monthly, source};

fn three_sources() -> RegionSpec {
    RegionSpec::new(Region::Ch)
        .with_source(Indicator::Cpi, source("dyn", "FIRST"))
        .with_source(Indicator::Cpi, source("dyn", "SECOND"))
        .with_source(Indicator::Cpi, source("dyn", "THIRD"))
}

#[tokio::test]
async fn fallback_skips_empty_and_stops_at_first_data() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("FIRST", MockBehavior::Return(Series::default()))
        .await;
    ctl.set_series_behavior("SECOND", MockBehavior::Return(monthly(2020, 1, &[1, 2, 3])))
        .await;
    ctl.set_series_behavior("THIRD", MockBehavior::Return(monthly(2010, 1, &[9])))
        .await;

    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(three_sources())
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();

    let (cpi, attr) = moneta
        .indicator_series(Region::Ch, Indicator::Cpi)
        .await
        .unwrap();
    assert_eq!(cpi.date_range(), Some((d(2020, 1), d(2020, 3))));
    assert_eq!(attr.series, "ch/cpi");

    let asked: Vec<String> = ctl.requests().await.into_iter().map(|r| r.id).collect();
    assert_eq!(asked, vec!["FIRST".to_string(), "SECOND".to_string()]);
}

#[tokio::test]
async fn deep_asks_every_source() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("SECOND", MockBehavior::Return(monthly(2020, 1, &[1, 2, 3])))
        .await;
    ctl.set_series_behavior("THIRD", MockBehavior::Return(monthly(2019, 11, &[7, 8, 9, 10])))
        .await;

    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(three_sources())
        .build()
        .unwrap();

    let (cpi, _) = moneta
        .indicator_series(Region::Ch, Indicator::Cpi)
        .await
        .unwrap();
    // FIRST is not found and skipped; SECOND wins the overlap.
    assert_eq!(cpi.date_range(), Some((d(2019, 11), d(2020, 3))));
    assert_eq!(cpi.value_at(d(2020, 1)), Some(1.into()));
    assert_eq!(cpi.value_at(d(2019, 12)), Some(8.into()));

    let mut asked: Vec<String> = ctl.requests().await.into_iter().map(|r| r.id).collect();
    asked.sort();
    assert_eq!(asked, vec!["FIRST", "SECOND", "THIRD"]);
}
