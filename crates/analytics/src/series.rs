//! Chart-ready point sequences.
//!
//! Every function here is pure: the same input always produces bit-identical output.

use core_types::{ForecastResult, MonthlySalesPoint, ProfitPoint, YearMonth};
use serde::{Deserialize, Serialize};

/// A single `(period, value)` point on a monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: YearMonth,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(period: YearMonth, value: f64) -> Self {
        Self { period, value }
    }
}

/// The series drawn on the forecast chart, each in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// The historical window as reported by the service.
    pub historical: Vec<SeriesPoint>,
    /// Exactly two points: the last historical point, then the forecast month.
    pub forecast: Vec<SeriesPoint>,
    /// A straight trend line anchored at the first observation, one point longer than
    /// `historical`. Present only when the forecast carries a trend analysis.
    pub regression: Option<Vec<SeriesPoint>>,
}

impl ForecastSeries {
    pub fn is_empty(&self) -> bool {
        self.historical.is_empty()
    }

    /// The month being forecast, if there is any history to continue from.
    pub fn next_period(&self) -> Option<YearMonth> {
        self.forecast.last().map(|point| point.period)
    }
}

/// Builds the historical, forecast-continuation and regression series for a forecast.
///
/// An empty historical window yields an empty `ForecastSeries`.
pub fn forecast_series(forecast: &ForecastResult) -> ForecastSeries {
    // `historical_window` is a BTreeMap keyed by `YearMonth`, so iteration is chronological.
    let historical: Vec<SeriesPoint> = forecast
        .historical_window
        .iter()
        .map(|(period, value)| SeriesPoint::new(*period, *value))
        .collect();

    let Some(last) = historical.last().copied() else {
        return ForecastSeries::default();
    };
    let next_period = last.period.next();

    let continuation = vec![last, SeriesPoint::new(next_period, forecast.forecast_amount)];

    let regression = forecast
        .trend
        .as_ref()
        .map(|trend| regression_series(&historical, trend.slope, next_period));

    ForecastSeries {
        historical,
        forecast: continuation,
        regression,
    }
}

/// Rebuilds a trend line of the given slope through the first historical value.
///
/// This ignores the model's own intercept; the line is for display only.
pub fn regression_series(
    historical: &[SeriesPoint],
    slope: f64,
    next_period: YearMonth,
) -> Vec<SeriesPoint> {
    let Some(first) = historical.first() else {
        return Vec::new();
    };

    let mut line: Vec<SeriesPoint> = historical
        .iter()
        .enumerate()
        .map(|(index, point)| SeriesPoint::new(point.period, first.value + slope * index as f64))
        .collect();

    if let Some(last) = line.last().copied() {
        line.push(SeriesPoint::new(next_period, last.value + slope));
    }
    line
}

/// The monthly sales line.
pub fn sales_series(sales: &[MonthlySalesPoint]) -> Vec<SeriesPoint> {
    sales
        .iter()
        .map(|point| SeriesPoint::new(point.period, point.amount))
        .collect()
}

/// A profit bar that knows whether it should be drawn as a loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitBar {
    pub period: String,
    pub profit: f64,
    pub is_loss: bool,
}

pub fn profit_series(profit: &[ProfitPoint]) -> Vec<ProfitBar> {
    profit
        .iter()
        .map(|point| ProfitBar {
            period: point.period.clone(),
            profit: point.profit,
            is_loss: point.profit < 0.0,
        })
        .collect()
}
