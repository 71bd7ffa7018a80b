use moneta::{MergeStrategy, MonetaError};

use crate::helpers::{d, mock_moneta, source};

#[tokio::test]
async fn series_returns_connector_data_unaligned() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let gdp = moneta.series(&source("moneta-mock", "GDP")).await.unwrap();
    assert_eq!(gdp.len(), 96);
    assert_eq!(gdp.observations[1].date, d(2000, 4));
}

#[tokio::test]
async fn series_from_unregistered_connector_is_not_found() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let err = moneta.series(&source("nobody", "GDP")).await.unwrap_err();
    assert!(matches!(err, MonetaError::NotFound { .. }));
}

#[tokio::test]
async fn series_failures_keep_connector_tag() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let err = moneta.series(&source("moneta-mock", "FAIL")).await.unwrap_err();
    assert!(matches!(err, MonetaError::Connector { ref connector, .. } if connector == "moneta-mock"));
}
