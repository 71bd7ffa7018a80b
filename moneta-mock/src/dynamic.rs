use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use moneta_core::connector::{IndicatorCatalogProvider, MonetaConnector, ObservationProvider};
use moneta_core::{IndicatorInfo, MonetaError, Series, SeriesRequest};

/// Scripted outcome of one mock call.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Succeed with this value.
    Return(T),
    /// Fail with this error.
    Fail(MonetaError),
    /// Never complete, so the caller's timeout fires.
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, MonetaError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct Script {
    series_rules: HashMap<String, MockBehavior<Series>>,
    indicator_rule: Option<MockBehavior<Vec<IndicatorInfo>>>,
    requests: Vec<SeriesRequest>,
}

/// Test-side handle that scripts a [`DynamicMockConnector`].
pub struct DynamicMockController {
    state: Arc<Mutex<Script>>,
}

impl DynamicMockController {
    /// Set the behavior for `observations` calls for a series id.
    pub async fn set_series_behavior(&self, id: impl Into<String>, behavior: MockBehavior<Series>) {
        let mut script = self.state.lock().await;
        script.series_rules.insert(id.into(), behavior);
    }

    /// Set the behavior for `indicators` calls.
    pub async fn set_indicators_behavior(&self, behavior: MockBehavior<Vec<IndicatorInfo>>) {
        let mut script = self.state.lock().await;
        script.indicator_rule = Some(behavior);
    }

    /// Every observation request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<SeriesRequest> {
        let script = self.state.lock().await;
        script.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut script = self.state.lock().await;
        script.series_rules.clear();
        script.indicator_rule = None;
        script.requests.clear();
    }
}

/// Connector whose responses are scripted through a [`DynamicMockController`].
///
/// Series ids without a rule yield `NotFound`; indicator listings without a
/// rule are `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<Script>>,
}

impl DynamicMockConnector {
    /// Create a connector named `name` together with its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn MonetaConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(Script::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn MonetaConnector>, controller)
    }
}

impl MonetaConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }

    fn as_indicator_catalog_provider(&self) -> Option<&dyn IndicatorCatalogProvider> {
        Some(self as &dyn IndicatorCatalogProvider)
    }
}

#[async_trait]
impl ObservationProvider for DynamicMockConnector {
    async fn observations(&self, req: &SeriesRequest) -> Result<Series, MonetaError> {
        let behavior = {
            let mut script = self.state.lock().await;
            script.requests.push(req.clone());
            script.series_rules.get(&req.id).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(MonetaError::not_found(format!("series {}", req.id))),
        }
    }
}

#[async_trait]
impl IndicatorCatalogProvider for DynamicMockConnector {
    async fn indicators(&self) -> Result<Vec<IndicatorInfo>, MonetaError> {
        let behavior = {
            let script = self.state.lock().await;
            script.indicator_rule.clone()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(MonetaError::unsupported("indicators")),
        }
    }
}
