use std::sync::Arc;

use moneta::{Capability, IndicatorInfo, Moneta, MonetaError};
use moneta_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use crate::helpers::FAST;

#[tokio::test]
async fn indicators_fall_back_to_next_catalog_provider() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_indicators_behavior(MockBehavior::Fail(MonetaError::Other("down".into())))
        .await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let list = moneta.indicators().await.unwrap();
    let ids: Vec<&str> = list.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["LUR", "NGDPD", "PCPIPCH"]);
}

#[tokio::test]
async fn first_successful_provider_wins() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    let only = IndicatorInfo {
        id: "X".into(),
        ..IndicatorInfo::default()
    };
    ctl.set_indicators_behavior(MockBehavior::Return(vec![only.clone()]))
        .await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    assert_eq!(moneta.indicators().await.unwrap(), vec![only]);
}

#[tokio::test]
async fn indicators_all_timed_out() {
    let (a, ctl_a) = DynamicMockConnector::new_with_controller("a");
    let (b, ctl_b) = DynamicMockConnector::new_with_controller("b");
    ctl_a.set_indicators_behavior(MockBehavior::Hang).await;
    ctl_b.set_indicators_behavior(MockBehavior::Hang).await;
    let moneta = Moneta::builder()
        .with_connector(a)
        .with_connector(b)
        .provider_timeout(FAST)
        .build()
        .unwrap();
    assert_eq!(
        moneta.indicators().await.unwrap_err(),
        MonetaError::AllProvidersTimedOut {
            capability: Capability::Indicators.to_string()
        }
    );
}
