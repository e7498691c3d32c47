use chrono::{DateTime, Utc};
use core_types::{CategorySalesPoint, ForecastResult, MonthlySalesPoint, ProfitPoint, Provenance};
use serde::{Deserialize, Serialize};

/// The four series fetched in one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub sales: Vec<MonthlySalesPoint>,
    pub forecast: Option<ForecastResult>,
    pub categories: Vec<CategorySalesPoint>,
    pub profit: Vec<ProfitPoint>,
}

/// A complete snapshot of the dashboard.
///
/// Snapshots are never edited after publication; every change produces a new value. While
/// `loading` is true the data fields still hold the previous cycle's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Incremented by the store on every publication.
    pub version: u64,
    pub sales: Vec<MonthlySalesPoint>,
    pub forecast: Option<ForecastResult>,
    pub categories: Vec<CategorySalesPoint>,
    pub profit: Vec<ProfitPoint>,
    pub loading: bool,
    /// Fatal reason of the last cycle, or a summary of the series that could not be loaded.
    pub last_error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub provenance: Provenance,
}

impl DashboardState {
    /// The state before the first refresh has completed.
    pub fn initial() -> Self {
        Self {
            version: 0,
            sales: Vec::new(),
            forecast: None,
            categories: Vec::new(),
            profit: Vec::new(),
            loading: true,
            last_error: None,
            last_updated_at: None,
            provenance: Provenance::Default,
        }
    }

    /// A fresh snapshot built from a completed cycle.
    ///
    /// Provenance follows the forecast: `Uploaded` only when the forecast says so.
    pub fn from_refresh(
        data: DashboardData,
        last_error: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let provenance = data
            .forecast
            .as_ref()
            .map(|forecast| forecast.provenance)
            .unwrap_or_default();

        Self {
            version: 0,
            sales: data.sales,
            forecast: data.forecast,
            categories: data.categories,
            profit: data.profit,
            loading: false,
            last_error,
            last_updated_at: Some(updated_at),
            provenance,
        }
    }

    /// This snapshot's data, marked as being revalidated.
    pub fn revalidating(&self) -> Self {
        Self {
            loading: true,
            last_error: None,
            ..self.clone()
        }
    }

    /// This snapshot's data, with a failed cycle recorded against it.
    pub fn failed(&self, reason: impl Into<String>) -> Self {
        Self {
            loading: false,
            last_error: Some(reason.into()),
            ..self.clone()
        }
    }

    pub fn has_data(&self) -> bool {
        !self.sales.is_empty()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Requests sent to the store from outside.
///
/// Serialized as `{"type": "Refresh"}` so the same shape can travel over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardSignal {
    /// The user asked for fresh data.
    Refresh,
    /// The upload workflow replaced the active dataset.
    DataReconfigured,
}
