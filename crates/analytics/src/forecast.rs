use crate::labels::{confidence_tone, trend_tone, DisplayTone};
use crate::metrics::average;
use core_types::{
    ConfidenceLevel, ForecastComponents, ForecastResult, Provenance, TrendDirection, YearMonth,
};
use serde::{Deserialize, Serialize};

/// Mean of the historical window, `0.0` when the window is empty.
pub fn historical_average(forecast: &ForecastResult) -> f64 {
    let values: Vec<f64> = forecast.historical_window.values().copied().collect();
    average(&values)
}

/// How far the forecast sits above (or below) the historical average, in percent.
///
/// Resolves to `0.0` when the window is empty or averages to zero.
pub fn growth_from_average(forecast: &ForecastResult) -> f64 {
    let mean = historical_average(forecast);
    if mean == 0.0 {
        return 0.0;
    }
    (forecast.forecast_amount - mean) / mean * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBadge {
    pub direction: TrendDirection,
    pub slope: f64,
    pub r_squared: f64,
    pub tone: DisplayTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBadge {
    pub level: ConfidenceLevel,
    pub volatility: f64,
    pub tone: DisplayTone,
}

/// Everything the forecast card shows besides the chart itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub forecast_amount: f64,
    pub method: String,
    pub provenance: Provenance,
    pub next_period: Option<YearMonth>,
    pub historical_average: f64,
    pub growth_from_average: f64,
    pub components: Option<ForecastComponents>,
    pub trend: Option<TrendBadge>,
    pub confidence: Option<ConfidenceBadge>,
}

pub fn summarize_forecast(forecast: &ForecastResult) -> ForecastSummary {
    ForecastSummary {
        forecast_amount: forecast.forecast_amount,
        method: forecast.method.clone(),
        provenance: forecast.provenance,
        next_period: forecast
            .historical_window
            .keys()
            .next_back()
            .map(YearMonth::next),
        historical_average: historical_average(forecast),
        growth_from_average: growth_from_average(forecast),
        components: forecast.components.clone(),
        trend: forecast.trend.as_ref().map(|trend| TrendBadge {
            direction: trend.direction.clone(),
            slope: trend.slope,
            r_squared: trend.r_squared,
            tone: trend_tone(&trend.direction),
        }),
        confidence: forecast.confidence.as_ref().map(|confidence| ConfidenceBadge {
            level: confidence.level.clone(),
            volatility: confidence.volatility,
            tone: confidence_tone(&confidence.level),
        }),
    }
}
