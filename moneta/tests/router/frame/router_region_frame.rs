use std::sync::Arc;

use moneta::{
    Capability, Decimal, Indicator, MergeStrategy, Moneta, MonetaError, Region, RegionSpec,
};
use moneta_mock::{DynamicMockConnector, MockBehavior, MockConnector, mock_catalog};

use crate::helpers::{FAST, d, mock_builder, mock_moneta, source};

#[tokio::test]
async fn region_frame_aligns_columns_and_derives_velocity() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let report = moneta.region_frame(Region::Us).await.unwrap();
    let frame = &report.frame;

    assert_eq!(report.region, Region::Us);
    assert_eq!(frame.columns(), ["m3", "gdp", "cpi", "recession", "v"]);
    assert_eq!(frame.len(), 288);
    assert_eq!(frame.dates().next(), Some(d(2000, 1)));

    // Quarterly GDP is carried forward within the quarter.
    assert_eq!(frame.value(d(2000, 2), "gdp"), Some(Decimal::from(10_000)));
    assert_eq!(frame.value(d(2000, 1), "v"), Some(Decimal::from(2)));
    // GDP ends in 2023-10, so velocity is missing afterwards.
    assert_eq!(frame.value(d(2023, 12), "gdp"), None);
    assert_eq!(frame.value(d(2023, 12), "v"), None);
    assert_eq!(frame.value(d(2008, 1), "recession"), Some(Decimal::ONE));
    assert_eq!(frame.value(d(2007, 12), "recession"), Some(Decimal::ZERO));

    let labels: Vec<&str> = report.attribution.iter().map(|a| a.series.as_str()).collect();
    assert_eq!(labels, ["us/m3", "us/gdp", "us/cpi", "us/recession"]);
    assert!(report.warnings.is_empty());
}

fn us_with_legacy_m3() -> RegionSpec {
    RegionSpec::new(Region::Us)
        .with_source(Indicator::M3, source("moneta-mock", "M3"))
        .with_source(Indicator::M3, source("moneta-mock", "M3-LEGACY"))
        .with_source(Indicator::Gdp, source("moneta-mock", "GDP"))
        .with_source(Indicator::Cpi, source("moneta-mock", "CPI"))
}

#[tokio::test]
async fn region_frame_fallback_uses_first_non_empty_source() {
    let moneta = mock_builder()
        .with_region(us_with_legacy_m3())
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();
    let report = moneta.region_frame(Region::Us).await.unwrap();

    assert_eq!(report.frame.len(), 288);
    assert_eq!(report.frame.dates().next(), Some(d(2000, 1)));
    assert_eq!(report.frame.value(d(2000, 1), "v"), Some(Decimal::from(2)));
    assert_eq!(report.attribution[0].series, "us/m3");
    assert_eq!(
        report.attribution[0].spans,
        vec![(
            "moneta-mock".to_string(),
            moneta::Span::new(d(2000, 1), d(2023, 12))
        )]
    );
}

#[tokio::test]
async fn region_frame_deep_backfills_from_legacy_source() {
    let moneta = mock_builder()
        .with_region(us_with_legacy_m3())
        .merge_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();
    let report = moneta.region_frame(Region::Us).await.unwrap();

    assert_eq!(report.frame.len(), 408);
    assert_eq!(report.frame.dates().next(), Some(d(1990, 1)));
    assert_eq!(report.frame.value(d(1990, 1), "m3"), Some(Decimal::from(3000)));
    assert_eq!(report.frame.value(d(1990, 1), "v"), None);
}

#[tokio::test]
async fn region_frame_drops_rows_before_start() {
    let moneta = mock_builder().start(d(2010, 1)).build().unwrap();
    let report = moneta.region_frame(Region::Eu).await.unwrap();
    assert_eq!(report.frame.len(), 14 * 12);
    assert_eq!(report.frame.first_valid_date("m3"), Some(d(2010, 1)));
}

#[tokio::test]
async fn failing_recession_source_becomes_a_warning() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior(
        "USREC",
        MockBehavior::Fail(MonetaError::Other("status 503".into())),
    )
    .await;
    let moneta = Moneta::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_connector(conn)
        .with_regions(mock_catalog())
        .recession_source(source("dyn", "USREC"))
        .build()
        .unwrap();

    let report = moneta.region_frame(Region::Ch).await.unwrap();
    assert_eq!(report.frame.len(), 288);
    assert_eq!(report.frame.first_valid_date("recession"), None);
    assert!(matches!(
        report.warnings.as_slice(),
        [MonetaError::AllProvidersFailed(_)]
    ));
}

#[tokio::test]
async fn missing_recession_source_leaves_column_empty_silently() {
    let moneta = Moneta::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_regions(mock_catalog())
        .build()
        .unwrap();
    let report = moneta.region_frame(Region::Jp).await.unwrap();
    assert_eq!(report.frame.column_index("recession"), Some(3));
    assert_eq!(report.frame.first_valid_date("recession"), None);
    assert!(report.warnings.is_empty());
    assert_eq!(report.attribution.len(), 3);
}

#[tokio::test]
async fn failing_indicator_fails_the_region() {
    let spec = RegionSpec::new(Region::Uk)
        .with_source(Indicator::M3, source("moneta-mock", "FAIL"))
        .with_source(Indicator::Gdp, source("moneta-mock", "GDP"))
        .with_source(Indicator::Cpi, source("moneta-mock", "CPI"));
    let moneta = mock_builder().with_region(spec).build().unwrap();
    let err = moneta.region_frame(Region::Uk).await.unwrap_err();
    assert!(matches!(err, MonetaError::AllProvidersFailed(ref es) if es.len() == 1));
}

#[tokio::test]
async fn region_frame_respects_request_deadline() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("SLOW", MockBehavior::Hang).await;
    let spec = RegionSpec::new(Region::Us)
        .with_source(Indicator::M3, source("moneta-mock", "M3"))
        .with_source(Indicator::Gdp, source("dyn", "SLOW"))
        .with_source(Indicator::Cpi, source("moneta-mock", "CPI"));
    let moneta = mock_builder()
        .with_connector(conn)
        .with_region(spec)
        .request_timeout(FAST)
        .build()
        .unwrap();
    let err = moneta.region_frame(Region::Us).await.unwrap_err();
    assert_eq!(err, MonetaError::request_timeout(Capability::RegionFrame));
}

#[tokio::test]
async fn unknown_region_is_not_found() {
    let moneta = Moneta::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let err = moneta.region_frame(Region::Us).await.unwrap_err();
    assert!(matches!(err, MonetaError::NotFound { .. }));
}
