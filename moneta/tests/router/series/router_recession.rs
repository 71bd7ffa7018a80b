use moneta::{Capability, MergeStrategy, Moneta, MonetaError, Span};
use moneta_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{d, mock_moneta, monthly, source};

#[tokio::test]
async fn recession_periods_from_fixture_flags() {
    let moneta = mock_moneta(MergeStrategy::Deep);
    let periods = moneta.recession_periods().await.unwrap();
    assert_eq!(
        periods,
        vec![
            Span::new(d(2001, 4), d(2001, 12)),
            Span::new(d(2008, 1), d(2009, 7)),
            Span::new(d(2020, 3), d(2020, 5)),
        ]
    );
}

#[tokio::test]
async fn recession_flags_are_month_aligned() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    let mut flags = monthly(2019, 12, &[0, 1, 1]);
    // Month-end label lands in its own month.
    flags.observations[0].date = chrono::NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    ctl.set_series_behavior("REC", MockBehavior::Return(flags)).await;
    let moneta = Moneta::builder()
        .with_connector(conn)
        .recession_source(source("dyn", "REC"))
        .build()
        .unwrap();

    let aligned = moneta.recession_flags().await.unwrap();
    let dates: Vec<_> = aligned.observations.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![d(2019, 12), d(2020, 1), d(2020, 2)]);
    // Still in recession at the end: closed at the last date.
    assert_eq!(
        moneta.recession_periods().await.unwrap(),
        vec![Span::new(d(2020, 1), d(2020, 2))]
    );
}

#[tokio::test]
async fn recession_without_source_is_unsupported() {
    let (conn, _ctl) = DynamicMockConnector::new_with_controller("dyn");
    let moneta = Moneta::builder().with_connector(conn).build().unwrap();
    let err = moneta.recession_periods().await.unwrap_err();
    assert_eq!(err, MonetaError::unsupported(Capability::RecessionFlags));
}
