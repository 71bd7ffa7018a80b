use moneta::{Indicator, MergeStrategy, MonetaError, Region, RegionSpec};

use crate::helpers::{mock_builder, mock_moneta, source};

#[tokio::test]
async fn download_builds_every_requested_region() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let report = moneta.download(&[Region::Us, Region::Eu, Region::Jp]).await.unwrap();
    assert_eq!(
        report.frames.keys().copied().collect::<Vec<_>>(),
        vec![Region::Us, Region::Eu, Region::Jp]
    );
    assert!(report.warnings.is_empty());
    assert_eq!(report.frames[&Region::Eu].frame.len(), 288);
}

#[tokio::test]
async fn failing_region_is_reported_not_fatal() {
    let broken = RegionSpec::new(Region::Ch)
        .with_source(Indicator::M3, source("moneta-mock", "M3"))
        .with_source(Indicator::Gdp, source("moneta-mock", "FAIL"))
        .with_source(Indicator::Cpi, source("moneta-mock", "CPI"));
    let moneta = mock_builder().with_region(broken).build().unwrap();

    let report = moneta.download(&[Region::Us, Region::Ch]).await.unwrap();
    assert!(report.frames.contains_key(&Region::Us));
    assert!(!report.frames.contains_key(&Region::Ch));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].0, Region::Ch);
    assert!(matches!(report.warnings[0].1, MonetaError::AllProvidersFailed(_)));
}

#[tokio::test]
async fn backfill_warnings_are_tagged_with_their_region() {
    let spec = RegionSpec::new(Region::Uk)
        .with_source(Indicator::M3, source("moneta-mock", "M3"))
        .with_source(Indicator::M3, source("moneta-mock", "FAIL"))
        .with_source(Indicator::Gdp, source("moneta-mock", "GDP"))
        .with_source(Indicator::Cpi, source("moneta-mock", "CPI"));
    let moneta = mock_builder().with_region(spec).build().unwrap();

    let report = moneta.download(&[Region::Uk]).await.unwrap();
    assert!(report.frames.contains_key(&Region::Uk));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].0, Region::Uk);
    assert_eq!(report.frames[&Region::Uk].warnings.len(), 1);
}

#[tokio::test]
async fn download_rejects_empty_and_duplicate_regions() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    assert!(matches!(
        moneta.download(&[]).await,
        Err(MonetaError::InvalidArg(_))
    ));
    assert!(matches!(
        moneta.download(&[Region::Us, Region::Us]).await,
        Err(MonetaError::InvalidArg(_))
    ));
}
