use std::time::Duration;

use moneta::{Capability, Indicator, MergeStrategy, Moneta, MonetaError, Region, RegionSpec};
use moneta_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{FAST, monthly, source};

fn spec(ids: &[&str]) -> RegionSpec {
    ids.iter().fold(RegionSpec::new(Region::Uk), |spec, id| {
        spec.with_source(Indicator::Gdp, source("dyn", id))
    })
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let (conn, _ctl) = DynamicMockConnector::new_with_controller("dyn");
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A", "B"]))
        .build()
        .unwrap();
    let err = moneta
        .indicator_series(Region::Uk, Indicator::Gdp)
        .await
        .unwrap_err();
    assert_eq!(err, MonetaError::not_found("uk/gdp"));
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("A", MockBehavior::Hang).await;
    ctl.set_series_behavior("B", MockBehavior::Hang).await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A", "B"]))
        .provider_timeout(FAST)
        .build()
        .unwrap();
    let err = moneta
        .indicator_series(Region::Uk, Indicator::Gdp)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        MonetaError::AllProvidersTimedOut {
            capability: Capability::Observations.to_string()
        }
    );
}

#[tokio::test]
async fn mixed_failures_are_aggregated() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("A", MockBehavior::Hang).await;
    ctl.set_series_behavior("B", MockBehavior::Fail(MonetaError::Data("bad csv".into())))
        .await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A", "B", "C"]))
        .provider_timeout(FAST)
        .build()
        .unwrap();
    let err = moneta
        .indicator_series(Region::Uk, Indicator::Gdp)
        .await
        .unwrap_err();
    match err {
        MonetaError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.contains(&MonetaError::provider_timeout("dyn", "observations")));
            assert!(errors.iter().any(
                |e| matches!(e, MonetaError::Connector { connector, msg } if connector == "dyn" && msg.contains("bad csv"))
            ));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn backfill_failure_does_not_fail_the_indicator() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("A", MockBehavior::Return(monthly(2021, 1, &[1, 2])))
        .await;
    ctl.set_series_behavior("B", MockBehavior::Fail(MonetaError::Other("503".into())))
        .await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A", "B"]))
        .build()
        .unwrap();
    let (gdp, _) = moneta
        .indicator_series(Region::Uk, Indicator::Gdp)
        .await
        .unwrap();
    assert_eq!(gdp.len(), 2);
}

#[tokio::test]
async fn request_deadline_bounds_the_whole_merge() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_series_behavior("A", MockBehavior::Hang).await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A"]))
        .provider_timeout(Duration::from_secs(60))
        .request_timeout(FAST)
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();
    let err = moneta
        .indicator_series(Region::Uk, Indicator::Gdp)
        .await
        .unwrap_err();
    assert_eq!(err, MonetaError::request_timeout(Capability::Observations));
}

#[tokio::test]
async fn unconfigured_region_and_indicator() {
    let (conn, _ctl) = DynamicMockConnector::new_with_controller("dyn");
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_region(spec(&["A"]))
        .build()
        .unwrap();
    let err = moneta
        .indicator_series(Region::Jp, Indicator::Gdp)
        .await
        .unwrap_err();
    assert!(matches!(err, MonetaError::NotFound { .. }));
    let err = moneta
        .indicator_series(Region::Uk, Indicator::M3)
        .await
        .unwrap_err();
    assert!(matches!(err, MonetaError::Unsupported { .. }));
}
