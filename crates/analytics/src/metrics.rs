//! Small numeric helpers shared by the transformers.
//!
//! All of them are total: empty input or a zero denominator resolves to `0.0`.

use core_types::{MonthlySalesPoint, YearMonth};
use serde::{Deserialize, Serialize};

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Population standard deviation, `0.0` for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = average(values);
    let variance = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Percentage change from `from` to `to`; `0.0` when `from` is zero.
pub fn percentage_growth(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return 0.0;
    }
    (to - from) / from * 100.0
}

/// Headline numbers for the monthly sales series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub months: usize,
    pub total: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub latest_period: Option<YearMonth>,
    pub latest_amount: Option<f64>,
    /// Latest month against the one before it, in percent.
    pub month_over_month_growth: f64,
}

pub fn summarize_sales(sales: &[MonthlySalesPoint]) -> SalesSummary {
    let amounts: Vec<f64> = sales.iter().map(|point| point.amount).collect();
    let latest = sales.last();

    let month_over_month_growth = match sales {
        [.., previous, latest] => percentage_growth(previous.amount, latest.amount),
        _ => 0.0,
    };

    SalesSummary {
        months: sales.len(),
        total: sum(&amounts),
        average: average(&amounts),
        min: amounts.iter().copied().reduce(f64::min).unwrap_or(0.0),
        max: amounts.iter().copied().reduce(f64::max).unwrap_or(0.0),
        latest_period: latest.map(|point| point.period),
        latest_amount: latest.map(|point| point.amount),
        month_over_month_growth,
    }
}

/// One row of the recent-months growth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub period: YearMonth,
    pub amount: f64,
    /// `None` for the first row of the table, which has nothing to compare against.
    pub growth: Option<f64>,
}

/// The trailing `last_n` months, each compared with the row above it.
pub fn growth_table(sales: &[MonthlySalesPoint], last_n: usize) -> Vec<GrowthRow> {
    let tail = &sales[sales.len().saturating_sub(last_n)..];

    tail.iter()
        .enumerate()
        .map(|(index, point)| GrowthRow {
            period: point.period,
            amount: point.amount,
            growth: index
                .checked_sub(1)
                .map(|previous| percentage_growth(tail[previous].amount, point.amount)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sales(amounts: &[(&str, f64)]) -> Vec<MonthlySalesPoint> {
        amounts
            .iter()
            .map(|(period, amount)| MonthlySalesPoint {
                period: period.parse().unwrap(),
                amount: *amount,
            })
            .collect()
    }

    #[test]
    fn empty_inputs_resolve_to_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(percentage_growth(0.0, 50.0), 0.0);
    }

    #[test]
    fn population_std_dev() {
        assert_relative_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }

    #[test]
    fn growth_is_relative_to_the_start() {
        assert_relative_eq!(percentage_growth(200.0, 250.0), 25.0);
        assert_relative_eq!(percentage_growth(200.0, 150.0), -25.0);
    }

    #[test]
    fn summary_compares_the_last_two_months() {
        let summary =
            summarize_sales(&sales(&[("2024-01", 100.0), ("2024-02", 80.0), ("2024-03", 120.0)]));

        assert_eq!(summary.months, 3);
        assert_relative_eq!(summary.total, 300.0);
        assert_relative_eq!(summary.average, 100.0);
        assert_relative_eq!(summary.min, 80.0);
        assert_relative_eq!(summary.max, 120.0);
        assert_eq!(summary.latest_period.unwrap().to_string(), "2024-03");
        assert_relative_eq!(summary.month_over_month_growth, 50.0);
    }

    #[test]
    fn summary_of_a_single_month_has_no_growth() {
        let summary = summarize_sales(&sales(&[("2024-01", 100.0)]));
        assert_eq!(summary.month_over_month_growth, 0.0);
        assert_eq!(summarize_sales(&[]).latest_amount, None);
    }

    #[test]
    fn growth_table_keeps_the_tail() {
        let rows = growth_table(
            &sales(&[("2024-01", 10.0), ("2024-02", 20.0), ("2024-03", 30.0)]),
            2,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period.to_string(), "2024-02");
        assert_eq!(rows[0].growth, None);
        assert_relative_eq!(rows[1].growth.unwrap(), 50.0);
    }
}
