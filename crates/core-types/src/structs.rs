use crate::enums::{ConfidenceLevel, Provenance, TrendDirection};
use crate::period::YearMonth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySalesPoint {
    pub period: YearMonth,
    pub amount: f64,
}

/// Total sales for one product category. Sequences of these are in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySalesPoint {
    pub category: String,
    pub amount: f64,
}

/// Profit for one period. Negative values are losses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitPoint {
    pub period: String,
    pub profit: f64,
}

/// The individual estimates blended into the ensemble forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastComponents {
    pub linear_regression: f64,
    pub moving_avg_3: f64,
    pub moving_avg_6: f64,
    pub weighted_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Change per month of the fitted regression line.
    pub slope: f64,
    pub direction: TrendDirection,
    /// Goodness of fit, in `[0, 1]`.
    pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    pub level: ConfidenceLevel,
    pub volatility: f64,
}

/// The next-month prediction produced by the analytics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub forecast_amount: f64,
    pub method: String,
    /// The trailing months the prediction was computed from, in chronological order.
    pub historical_window: BTreeMap<YearMonth, f64>,
    pub provenance: Provenance,
    pub forecast_period: Option<String>,
    pub components: Option<ForecastComponents>,
    pub trend: Option<TrendAnalysis>,
    pub confidence: Option<ConfidenceMetrics>,
}

/// The forecast endpoint answers with either a single object or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastPayload {
    Single(ForecastResult),
    Many(Vec<ForecastResult>),
}

impl ForecastPayload {
    /// The forecast to use: the single object, or the first element of a list.
    pub fn into_first(self) -> Option<ForecastResult> {
        match self {
            ForecastPayload::Single(forecast) => Some(forecast),
            ForecastPayload::Many(forecasts) => forecasts.into_iter().next(),
        }
    }
}
