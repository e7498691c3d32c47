use crate::distribution::analyze_categories;
use crate::forecast::summarize_forecast;
use crate::metrics::summarize_sales;
use crate::profit::analyze_profit;
use crate::report::DashboardReport;
use core_types::{CategorySalesPoint, ForecastResult, MonthlySalesPoint, ProfitPoint};

/// A stateless calculator for deriving dashboard statistics from fetched series.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating dashboard statistics.
    ///
    /// # Arguments
    ///
    /// * `sales` - Monthly sales, oldest first.
    /// * `forecast` - The next-month forecast, if it was available.
    /// * `categories` - Category totals, best seller first.
    /// * `profit` - Profit per period.
    ///
    /// Never fails: empty series produce zeroed summaries.
    pub fn calculate(
        &self,
        sales: &[MonthlySalesPoint],
        forecast: Option<&ForecastResult>,
        categories: &[CategorySalesPoint],
        profit: &[ProfitPoint],
    ) -> DashboardReport {
        DashboardReport {
            sales: summarize_sales(sales),
            forecast: forecast.map(summarize_forecast),
            categories: analyze_categories(categories),
            profit: analyze_profit(profit),
        }
    }
}
