use api_client::{AnalyticsApi, ApiError};
use async_trait::async_trait;
use core_types::{
    CategorySalesPoint, ForecastPayload, ForecastResult, MonthlySalesPoint, ProfitPoint,
    Provenance, TrendAnalysis, TrendDirection,
};
use engine::{Aggregator, DashboardStore, run_signal_loop};
use events::DashboardSignal;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Barrier, Notify, mpsc};

/// Which calls fail, and with what message. `None` means the call succeeds.
#[derive(Clone, Default)]
struct Failures {
    health: Option<String>,
    sales: Option<String>,
    forecast: Option<String>,
    categories: Option<String>,
    profit: Option<String>,
}

#[derive(Clone)]
struct Scenario {
    failures: Failures,
    sales: Vec<MonthlySalesPoint>,
    forecast: ForecastPayload,
    categories: Vec<CategorySalesPoint>,
    profit: Vec<ProfitPoint>,
}

struct StubApi {
    scenario: Mutex<Scenario>,
    /// When set, the liveness probe waits for a permit before answering.
    gate: Option<Arc<Notify>>,
    /// When set, every data fetch waits here before answering.
    barrier: Option<Arc<Barrier>>,
}

impl StubApi {
    fn new(scenario: Scenario) -> Self {
        Self {
            scenario: Mutex::new(scenario),
            gate: None,
            barrier: None,
        }
    }

    fn gated(scenario: Scenario, gate: Arc<Notify>) -> Self {
        Self {
            scenario: Mutex::new(scenario),
            gate: Some(gate),
            barrier: None,
        }
    }

    /// Every fetch blocks until all four have started.
    fn rendezvous(scenario: Scenario) -> Self {
        Self {
            scenario: Mutex::new(scenario),
            gate: None,
            barrier: Some(Arc::new(Barrier::new(4))),
        }
    }

    async fn wait_for_siblings(&self) {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
    }

    fn set_failures(&self, failures: Failures) {
        self.scenario.lock().unwrap().failures = failures;
    }

    fn answer<T>(
        &self,
        pick: impl FnOnce(&Scenario) -> (Option<String>, T),
    ) -> Result<T, ApiError> {
        let scenario = self.scenario.lock().unwrap();
        match pick(&scenario) {
            (Some(message), _) => Err(ApiError::Status { status: 500, message }),
            (None, value) => Ok(value),
        }
    }
}

#[async_trait]
impl AnalyticsApi for StubApi {
    async fn check_health(&self) -> Result<(), ApiError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.answer(|s| (s.failures.health.clone(), ()))
    }

    async fn fetch_monthly_sales(&self) -> Result<Vec<MonthlySalesPoint>, ApiError> {
        self.wait_for_siblings().await;
        self.answer(|s| (s.failures.sales.clone(), s.sales.clone()))
    }

    async fn fetch_forecast(&self) -> Result<ForecastPayload, ApiError> {
        self.wait_for_siblings().await;
        self.answer(|s| (s.failures.forecast.clone(), s.forecast.clone()))
    }

    async fn fetch_category_sales(&self) -> Result<Vec<CategorySalesPoint>, ApiError> {
        self.wait_for_siblings().await;
        self.answer(|s| (s.failures.categories.clone(), s.categories.clone()))
    }

    async fn fetch_profit_trend(&self) -> Result<Vec<ProfitPoint>, ApiError> {
        self.wait_for_siblings().await;
        self.answer(|s| (s.failures.profit.clone(), s.profit.clone()))
    }
}

fn forecast(amount: f64, provenance: Provenance) -> ForecastResult {
    let window = [("2024-01", 100.0), ("2024-02", 110.0), ("2024-03", 120.0)];
    let historical_window: BTreeMap<_, _> = window
        .into_iter()
        .map(|(period, value)| (period.parse().unwrap(), value))
        .collect();

    ForecastResult {
        forecast_amount: amount,
        method: "Ensemble".to_string(),
        historical_window,
        provenance,
        forecast_period: Some("2024-04".to_string()),
        components: None,
        trend: Some(TrendAnalysis {
            slope: 10.0,
            direction: TrendDirection::Up,
            r_squared: 0.9,
        }),
        confidence: None,
    }
}

fn scenario(provenance: Provenance) -> Scenario {
    Scenario {
        failures: Failures::default(),
        sales: vec![
            MonthlySalesPoint { period: "2024-01".parse().unwrap(), amount: 100.0 },
            MonthlySalesPoint { period: "2024-02".parse().unwrap(), amount: 110.0 },
            MonthlySalesPoint { period: "2024-03".parse().unwrap(), amount: 120.0 },
        ],
        forecast: ForecastPayload::Single(forecast(130.0, provenance)),
        categories: vec![
            CategorySalesPoint { category: "Technology".to_string(), amount: 500.0 },
            CategorySalesPoint { category: "Furniture".to_string(), amount: 300.0 },
        ],
        profit: vec![
            ProfitPoint { period: "2024-01".to_string(), profit: 20.0 },
            ProfitPoint { period: "2024-02".to_string(), profit: -5.0 },
        ],
    }
}

fn store_for(api: Arc<StubApi>) -> DashboardStore {
    DashboardStore::new(Aggregator::new(api))
}

#[tokio::test]
async fn store_starts_empty_and_loading() {
    let store = store_for(Arc::new(StubApi::new(scenario(Provenance::Default))));
    let state = store.snapshot();

    assert!(state.loading);
    assert_eq!(state.version, 0);
    assert!(state.sales.is_empty());
    assert_eq!(state.last_updated_at, None);
}

#[tokio::test]
async fn successful_cycle_publishes_everything() {
    let store = store_for(Arc::new(StubApi::new(scenario(Provenance::Uploaded))));
    let state = store.refresh().await;

    assert!(!state.loading);
    assert_eq!(state.last_error, None);
    assert_eq!(state.sales.len(), 3);
    assert_eq!(state.categories.len(), 2);
    assert_eq!(state.profit.len(), 2);
    assert_eq!(state.forecast.as_ref().map(|f| f.forecast_amount), Some(130.0));
    assert_eq!(state.provenance, Provenance::Uploaded);
    assert!(state.last_updated_at.is_some());
    // One publication for the loading flag, one for the result.
    assert_eq!(state.version, 2);
    assert_eq!(store.snapshot(), state);
}

#[tokio::test]
async fn partial_failure_keeps_what_loaded() {
    let mut scenario = scenario(Provenance::Default);
    scenario.failures = Failures {
        categories: Some("category file missing".to_string()),
        profit: Some("HTTP 500: Internal Server Error".to_string()),
        ..Failures::default()
    };
    let store = store_for(Arc::new(StubApi::new(scenario)));
    let state = store.refresh().await;

    assert!(!state.loading);
    assert_eq!(state.sales.len(), 3);
    assert!(state.forecast.is_some());
    assert!(state.categories.is_empty());
    assert!(state.profit.is_empty());
    assert_eq!(
        state.last_error.as_deref(),
        Some(
            "Some data unavailable: categories: category file missing, \
             profit: HTTP 500: Internal Server Error"
        )
    );
}

#[tokio::test]
async fn failed_forecast_falls_back_to_default_provenance() {
    let mut scenario = scenario(Provenance::Uploaded);
    scenario.failures.forecast = Some("no model".to_string());
    let store = store_for(Arc::new(StubApi::new(scenario)));
    let state = store.refresh().await;

    assert_eq!(state.forecast, None);
    assert_eq!(state.provenance, Provenance::Default);
    assert_eq!(
        state.last_error.as_deref(),
        Some("Some data unavailable: forecast: no model")
    );
}

#[tokio::test]
async fn total_failure_keeps_the_previous_snapshot() {
    let api = Arc::new(StubApi::new(scenario(Provenance::Uploaded)));
    let store = store_for(api.clone());
    let first = store.refresh().await;

    api.set_failures(Failures {
        sales: Some("sales down".to_string()),
        forecast: Some("forecast down".to_string()),
        categories: Some("categories down".to_string()),
        profit: Some("profit down".to_string()),
        ..Failures::default()
    });
    let second = store.refresh().await;

    assert!(!second.loading);
    // The bare reason of the first failure, without the series name.
    assert_eq!(second.last_error.as_deref(), Some("sales down"));
    assert_eq!(second.sales, first.sales);
    assert_eq!(second.forecast, first.forecast);
    assert_eq!(second.provenance, Provenance::Uploaded);
    assert_eq!(second.last_updated_at, first.last_updated_at);
    assert_eq!(second.version, 4);
}

#[tokio::test]
async fn failed_sales_with_nothing_to_show_is_fatal() {
    let mut scenario = scenario(Provenance::Default);
    scenario.failures.sales = Some("HTTP 404: Not Found".to_string());
    let store = store_for(Arc::new(StubApi::new(scenario)));
    let state = store.refresh().await;

    assert!(!state.loading);
    assert!(state.categories.is_empty());
    assert_eq!(state.last_error.as_deref(), Some("HTTP 404: Not Found"));
}

#[tokio::test]
async fn liveness_failure_aborts_the_cycle() {
    let api = Arc::new(StubApi::new(scenario(Provenance::Default)));
    let store = store_for(api.clone());
    let first = store.refresh().await;

    api.set_failures(Failures {
        health: Some("Failed to fetch".to_string()),
        ..Failures::default()
    });
    let second = store.refresh().await;

    assert!(!second.loading);
    assert_eq!(second.last_error.as_deref(), Some("Failed to fetch"));
    assert_eq!(second.sales, first.sales);
    assert_eq!(second.last_updated_at, first.last_updated_at);
}

#[tokio::test]
async fn list_shaped_forecast_uses_the_first_element() {
    let mut scenario = scenario(Provenance::Default);
    scenario.forecast = ForecastPayload::Many(vec![
        forecast(200.0, Provenance::Uploaded),
        forecast(300.0, Provenance::Default),
    ]);
    let store = store_for(Arc::new(StubApi::new(scenario)));
    let state = store.refresh().await;

    assert_eq!(state.forecast.as_ref().map(|f| f.forecast_amount), Some(200.0));
    assert_eq!(state.provenance, Provenance::Uploaded);
}

#[tokio::test]
async fn empty_forecast_list_means_no_forecast() {
    let mut scenario = scenario(Provenance::Default);
    scenario.forecast = ForecastPayload::Many(Vec::new());
    let store = store_for(Arc::new(StubApi::new(scenario)));
    let state = store.refresh().await;

    assert_eq!(state.forecast, None);
    assert_eq!(state.last_error, None);
    assert_eq!(state.provenance, Provenance::Default);
}

#[tokio::test]
async fn readers_see_previous_data_while_revalidating() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(StubApi::gated(scenario(Provenance::Default), gate.clone()));
    let store = Arc::new(store_for(api.clone()));

    gate.notify_one();
    let first = store.refresh().await;

    let mut rx = store.subscribe();
    let background = {
        let store = store.clone();
        tokio::spawn(async move { store.refresh().await })
    };

    rx.changed().await.unwrap();
    let during = rx.borrow_and_update().clone();
    assert!(during.loading);
    assert_eq!(during.last_error, None);
    assert_eq!(during.sales, first.sales);
    assert_eq!(during.version, first.version + 1);

    gate.notify_one();
    let after = background.await.unwrap();
    assert!(!after.loading);
    assert_eq!(after.version, first.version + 2);
}

#[tokio::test]
async fn signal_loop_applies_signals_until_closed() {
    let api = Arc::new(StubApi::new(scenario(Provenance::Default)));
    let store = Arc::new(store_for(api));
    let (signal_tx, signal_rx) = mpsc::channel(8);

    signal_tx.send(DashboardSignal::Refresh).await.unwrap();
    signal_tx.send(DashboardSignal::DataReconfigured).await.unwrap();
    drop(signal_tx);

    run_signal_loop(store.clone(), signal_rx).await;

    let state = store.snapshot();
    assert_eq!(state.version, 4);
    assert!(!state.loading);
    assert_eq!(state.last_error, None);
}

#[tokio::test]
async fn the_four_fetches_are_in_flight_together() {
    let store = store_for(Arc::new(StubApi::rendezvous(scenario(Provenance::Default))));

    // Each fetch waits until all four have started, so fetching one after another would
    // never get past the first.
    let state = tokio::time::timeout(Duration::from_secs(5), store.refresh())
        .await
        .expect("fetches were not issued concurrently");

    assert_eq!(state.last_error, None);
    assert_eq!(state.sales.len(), 3);
    assert!(state.forecast.is_some());
    assert_eq!(state.categories.len(), 2);
    assert_eq!(state.profit.len(), 2);
}

#[tokio::test]
async fn a_failure_after_the_join_does_not_cancel_the_others() {
    let mut scenario = scenario(Provenance::Uploaded);
    scenario.failures.profit = Some("profit sheet missing".to_string());
    let store = store_for(Arc::new(StubApi::rendezvous(scenario)));

    let state = tokio::time::timeout(Duration::from_secs(5), store.refresh())
        .await
        .expect("fetches were not issued concurrently");

    assert!(!state.loading);
    assert_eq!(state.sales.len(), 3);
    assert!(state.forecast.is_some());
    assert_eq!(state.categories.len(), 2);
    assert!(state.profit.is_empty());
    assert_eq!(state.provenance, Provenance::Uploaded);
    assert_eq!(
        state.last_error.as_deref(),
        Some("Some data unavailable: profit: profit sheet missing")
    );
}
