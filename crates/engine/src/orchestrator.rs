use crate::error::EngineError;
use api_client::{AnalyticsApi, ApiError};
use chrono::Utc;
use core_types::ForecastPayload;
use events::{DashboardData, DashboardState};
use std::fmt;
use std::sync::Arc;

/// Prefix of `last_error` when some, but not all, of the series could be loaded.
pub const PARTIAL_FAILURE_PREFIX: &str = "Some data unavailable: ";

/// A fetch that did not produce its series.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub series: &'static str,
    pub reason: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.series, self.reason)
    }
}

/// The settled result of a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    pub fn settle(series: &'static str, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Fetched(value),
            Err(e) => {
                tracing::warn!(series, error = %e, "Fetch failed.");
                FetchOutcome::Failed(FetchFailure {
                    series,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Returns the value, or records the failure and returns `None`.
    fn record_into(self, failures: &mut Vec<FetchFailure>) -> Option<T> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            FetchOutcome::Failed(failure) => {
                failures.push(failure);
                None
            }
        }
    }
}

/// Everything a cycle managed to load, plus what it could not.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub data: DashboardData,
    /// In fetch order: sales, forecast, categories, profit.
    pub failures: Vec<FetchFailure>,
}

impl RefreshOutcome {
    /// `Some data unavailable: <series>: <reason>, ...`, or `None` when nothing failed.
    pub fn partial_error(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let reasons: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        Some(format!("{PARTIAL_FAILURE_PREFIX}{}", reasons.join(", ")))
    }
}

/// Runs refresh cycles against the analytics service.
#[derive(Clone)]
pub struct Aggregator {
    api: Arc<dyn AnalyticsApi>,
}

impl Aggregator {
    pub fn new(api: Arc<dyn AnalyticsApi>) -> Self {
        Self { api }
    }

    /// Probes the service, then fetches the four series concurrently.
    ///
    /// A failed fetch never cancels the others; its field is left empty and its reason is
    /// recorded. The cycle as a whole fails when the probe fails, or when anything failed
    /// and there are no monthly sales to show.
    pub async fn collect(&self) -> Result<RefreshOutcome, EngineError> {
        self.api.check_health().await?;

        let (sales, forecast, categories, profit) = tokio::join!(
            self.api.fetch_monthly_sales(),
            self.api.fetch_forecast(),
            self.api.fetch_category_sales(),
            self.api.fetch_profit_trend()
        );

        let mut failures = Vec::new();
        let sales = FetchOutcome::settle("sales", sales)
            .record_into(&mut failures)
            .unwrap_or_default();
        let forecast = FetchOutcome::settle("forecast", forecast)
            .record_into(&mut failures)
            .and_then(ForecastPayload::into_first);
        let categories = FetchOutcome::settle("categories", categories)
            .record_into(&mut failures)
            .unwrap_or_default();
        let profit = FetchOutcome::settle("profit", profit)
            .record_into(&mut failures)
            .unwrap_or_default();

        if sales.is_empty() {
            if let Some(first) = failures.first() {
                return Err(EngineError::DataUnavailable(first.reason.clone()));
            }
        }

        Ok(RefreshOutcome {
            data: DashboardData {
                sales,
                forecast,
                categories,
                profit,
            },
            failures,
        })
    }

    /// Produces the snapshot that follows `previous`.
    ///
    /// Never fails: a failed cycle keeps `previous`'s data and records the reason.
    #[tracing::instrument(name = "aggregate", skip_all)]
    pub async fn refresh(&self, previous: &DashboardState) -> DashboardState {
        match self.collect().await {
            Ok(outcome) => {
                let last_error = outcome.partial_error();
                tracing::info!(
                    sales = outcome.data.sales.len(),
                    categories = outcome.data.categories.len(),
                    profit = outcome.data.profit.len(),
                    forecast = outcome.data.forecast.is_some(),
                    failures = outcome.failures.len(),
                    "Refresh cycle complete."
                );
                DashboardState::from_refresh(outcome.data, last_error, Utc::now())
            }
            Err(e) => {
                tracing::error!(error = %e, "Refresh cycle failed; keeping previous data.");
                previous.failed(e.to_string())
            }
        }
    }
}
