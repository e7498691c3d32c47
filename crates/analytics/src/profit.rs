use crate::metrics::average;
use core_types::ProfitPoint;
use serde::{Deserialize, Serialize};

/// Direction of the profit series. There is no flat case: a zero change reports `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitTrendSummary {
    pub periods: usize,
    pub total: f64,
    pub average: f64,
    pub first_half_mean: f64,
    pub second_half_mean: f64,
    /// Second-half mean against the first-half mean, in percent of `|first_half_mean|`.
    pub trend_percentage: f64,
    pub direction: ProfitDirection,
    pub negative_periods: usize,
    pub profitable_periods: usize,
    pub fully_profitable: bool,
}

/// Compares the mean profit of the second half of the series with the first half.
///
/// The split point is `floor(n / 2)`, so for an odd length the extra period belongs to the
/// second half.
pub fn analyze_profit(profit: &[ProfitPoint]) -> ProfitTrendSummary {
    let values: Vec<f64> = profit.iter().map(|point| point.profit).collect();
    let (first_half, second_half) = values.split_at(values.len() / 2);

    let first_half_mean = average(first_half);
    let second_half_mean = average(second_half);

    let trend_percentage = if first_half_mean == 0.0 {
        0.0
    } else {
        (second_half_mean - first_half_mean) / first_half_mean.abs() * 100.0
    };

    // TODO: decide with the dashboard owners whether an unchanged trend should read as flat.
    let direction = if trend_percentage > 0.0 {
        ProfitDirection::Up
    } else {
        ProfitDirection::Down
    };

    let negative_periods = values.iter().filter(|value| **value < 0.0).count();

    ProfitTrendSummary {
        periods: values.len(),
        total: values.iter().sum(),
        average: average(&values),
        first_half_mean,
        second_half_mean,
        trend_percentage,
        direction,
        negative_periods,
        profitable_periods: values.len() - negative_periods,
        fully_profitable: negative_periods == 0,
    }
}
