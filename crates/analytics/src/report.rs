use crate::distribution::CategoryBreakdown;
use crate::forecast::ForecastSummary;
use crate::metrics::SalesSummary;
use crate::profit::ProfitTrendSummary;
use serde::{Deserialize, Serialize};

/// A complete, standardized set of dashboard statistics.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the CLI prints and the
/// HTTP API returns next to the raw snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    // I. Monthly sales
    pub sales: SalesSummary,

    // II. Next-month forecast (absent when the forecast series failed to load)
    pub forecast: Option<ForecastSummary>,

    // III. Category mix
    pub categories: CategoryBreakdown,

    // IV. Profit trend
    pub profit: ProfitTrendSummary,
}
