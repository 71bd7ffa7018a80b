use std::sync::Arc;
use std::time::Duration;

use moneta::{Capability, Indicator, MergeStrategy, Moneta, MonetaError, Region, RegionSpec};
use moneta_mock::MockConnector;

use crate::helpers::{d, mock_builder, source};

#[test]
fn build_without_connectors_is_invalid() {
    let err = Moneta::builder()
        .with_region(RegionSpec::new(Region::Us))
        .build()
        .err()
        .expect("build must fail");
    assert!(matches!(err, MonetaError::InvalidArg(_)));
}

#[test]
fn build_drops_sources_with_unknown_connectors() {
    let spec = RegionSpec::new(Region::Eu)
        .with_source(Indicator::M3, source("nobody", "M3"))
        .with_source(Indicator::M3, source("moneta-mock", "M3"))
        .with_source(Indicator::Gdp, source("nobody", "GDP"));
    let moneta = Moneta::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_region(spec)
        .build()
        .unwrap();

    let kept = moneta.region_spec(Region::Eu).unwrap();
    assert_eq!(kept.sources_for(Indicator::M3).len(), 1);
    assert_eq!(
        kept.sources_for(Indicator::M3)[0].connector.as_str(),
        "moneta-mock"
    );
    assert!(kept.sources_for(Indicator::Gdp).is_empty());
}

#[tokio::test]
async fn unknown_recession_source_is_dropped() {
    let moneta = mock_builder()
        .recession_source(source("nobody", "USREC"))
        .build()
        .unwrap();
    let err = moneta.recession_flags().await.unwrap_err();
    assert_eq!(err, MonetaError::unsupported(Capability::RecessionFlags));
}

#[test]
fn builder_settings_reach_the_config() {
    let moneta = mock_builder()
        .merge_strategy(MergeStrategy::Fallback)
        .provider_timeout(Duration::from_secs(5))
        .request_timeout(Duration::from_secs(9))
        .start(d(2010, 1))
        .build()
        .unwrap();
    let cfg = moneta.config();
    assert_eq!(cfg.merge_strategy, MergeStrategy::Fallback);
    assert_eq!(cfg.provider_timeout, Duration::from_secs(5));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(9)));
    assert_eq!(cfg.start, Some(d(2010, 1)));
    assert_eq!(moneta.regions().collect::<Vec<_>>(), Region::ALL.to_vec());
}

#[test]
fn later_region_spec_replaces_earlier_one() {
    let moneta = mock_builder()
        .with_region(
            RegionSpec::new(Region::Jp)
                .with_source(Indicator::M3, source("moneta-mock", "M3-LEGACY")),
        )
        .build()
        .unwrap();
    let spec = moneta.region_spec(Region::Jp).unwrap();
    assert_eq!(spec.sources_for(Indicator::M3)[0].request.id, "M3-LEGACY");
    assert!(spec.sources_for(Indicator::Cpi).is_empty());
}
