use std::sync::Arc;

use moneta::{Decimal, Indicator, MergeStrategy, Moneta, Region, RegionSpec, Span};
use moneta_mock::MockConnector;

use crate::helpers::{d, source};

fn two_vintages(strategy: MergeStrategy) -> Moneta {
    let spec = RegionSpec::new(Region::Us)
        .with_source(Indicator::M3, source("primary", "M3"))
        .with_source(Indicator::M3, source("legacy", "M3-LEGACY"))
        .with_source(Indicator::Gdp, source("primary", "GDP"));
    Moneta::builder()
        .with_connector(Arc::new(MockConnector::named("primary")))
        .with_connector(Arc::new(MockConnector::named("legacy")))
        .with_region(spec)
        .merge_strategy(strategy)
        .build()
        .unwrap()
}

#[tokio::test]
async fn deep_merge_backfills_from_lower_priority_source() {
    let moneta = two_vintages(MergeStrategy::Deep);
    let (m3, attr) = moneta
        .indicator_series(Region::Us, Indicator::M3)
        .await
        .unwrap();

    // 1990-01 ..= 2023-12
    assert_eq!(m3.len(), 408);
    assert_eq!(m3.date_range(), Some((d(1990, 1), d(2023, 12))));
    // Overlap (2000-2001) comes from the primary source.
    assert_eq!(m3.value_at(d(2000, 6)), Some(Decimal::from(5125)));
    assert_eq!(m3.value_at(d(1995, 1)), Some(Decimal::from(3000 + 15 * 60)));

    assert_eq!(attr.series, "us/m3");
    assert_eq!(
        attr.spans,
        vec![
            ("legacy".to_string(), Span::new(d(1990, 1), d(1999, 12))),
            ("primary".to_string(), Span::new(d(2000, 1), d(2023, 12))),
        ]
    );
}

#[tokio::test]
async fn quarterly_source_is_aligned_before_merge() {
    let moneta = two_vintages(MergeStrategy::Deep);
    let (gdp, attr) = moneta
        .indicator_series(Region::Us, Indicator::Gdp)
        .await
        .unwrap();
    // 96 quarters expand to 95 * 3 + 1 months.
    assert_eq!(gdp.len(), 286);
    assert_eq!(gdp.value_at(d(2000, 3)), Some(Decimal::from(10_000)));
    assert_eq!(gdp.value_at(d(2000, 4)), Some(Decimal::from(10_120)));
    assert_eq!(attr.spans.len(), 1);
}

#[tokio::test]
async fn fallback_merge_keeps_only_the_first_non_empty_source() {
    let moneta = two_vintages(MergeStrategy::Fallback);
    let (m3, attr) = moneta
        .indicator_series(Region::Us, Indicator::M3)
        .await
        .unwrap();
    assert_eq!(m3.date_range(), Some((d(2000, 1), d(2023, 12))));
    assert_eq!(attr.spans.len(), 1);
    assert_eq!(attr.spans[0].0, "primary");
}
