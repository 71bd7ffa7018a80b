use moneta::{Decimal, Indicator, Moneta, Region, RegionSpec};
use moneta_mock::{DynamicMockConnector, MockBehavior};
use proptest::prelude::*;

use crate::helpers::{d, monthly, source};

fn month(offset: u32) -> chrono::NaiveDate {
    d(2000, 1)
        .checked_add_months(chrono::Months::new(offset))
        .unwrap()
}

fn run_merge(a: (u32, u32), b: (u32, u32)) {
    tokio_test::block_on(async move {
        let (conn_a, ctl_a) = DynamicMockConnector::new_with_controller("a");
        let (conn_b, ctl_b) = DynamicMockConnector::new_with_controller("b");
        let values = |base: i64, len: u32| (0..i64::from(len)).map(|i| base + i).collect::<Vec<_>>();
        let (ya, ma) = ymd(month(a.0));
        let (yb, mb) = ymd(month(b.0));
        ctl_a
            .set_series_behavior("S", MockBehavior::Return(monthly(ya, ma, &values(100, a.1))))
            .await;
        ctl_b
            .set_series_behavior("S", MockBehavior::Return(monthly(yb, mb, &values(200, b.1))))
            .await;

        let spec = RegionSpec::new(Region::Eu)
            .with_source(Indicator::M3, source("a", "S"))
            .with_source(Indicator::M3, source("b", "S"));
        let moneta = Moneta::builder()
            .with_connector(conn_a)
            .with_connector(conn_b)
            .with_region(spec)
            .build()
            .unwrap();
        let (merged, attr) = moneta
            .indicator_series(Region::Eu, Indicator::M3)
            .await
            .unwrap();

        let in_a = |o: u32| a.0 <= o && o < a.0 + a.1;
        let in_b = |o: u32| b.0 <= o && o < b.0 + b.1;
        let expected: Vec<u32> = (0..80).filter(|&o| in_a(o) || in_b(o)).collect();
        assert_eq!(merged.len(), expected.len());

        let mut covered = 0usize;
        for (_, span) in &attr.spans {
            assert!(span.start <= span.end);
            covered += merged
                .observations
                .iter()
                .filter(|o| span.contains(o.date))
                .count();
        }
        assert_eq!(covered, merged.len(), "spans must partition the merged dates");

        for o in expected {
            let date = month(o);
            let owners: Vec<&str> = attr
                .spans
                .iter()
                .filter(|(_, s)| s.contains(date))
                .map(|(n, _)| n.as_str())
                .collect();
            let (want_owner, want_value) = if in_a(o) {
                ("a", 100 + i64::from(o - a.0))
            } else {
                ("b", 200 + i64::from(o - b.0))
            };
            assert_eq!(owners, vec![want_owner]);
            assert_eq!(merged.value_at(date), Some(Decimal::from(want_value)));
        }
    });
}

fn ymd(date: chrono::NaiveDate) -> (i32, u32) {
    use chrono::Datelike;
    (date.year(), date.month())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]

    #[test]
    fn deep_merge_attribution_partitions_dates(
        a_start in 0u32..40,
        a_len in 1u32..40,
        b_start in 0u32..40,
        b_len in 1u32..40,
    ) {
        run_merge((a_start, a_len), (b_start, b_len));
    }
}
