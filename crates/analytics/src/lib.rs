//! # Salescope Analytics
//!
//! Turns the raw series fetched from the analytics service into chart-ready series and
//! summary statistics.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no async, no knowledge of where the data came from. Depends only
//!   on `core-types`.
//! - **Total functions:** every transformer accepts any input that satisfies the data model.
//!   Empty series, zero means and zero denominators resolve to documented defaults (`0.0`,
//!   `DistributionShape::NoData`, an empty `ForecastSeries`) instead of errors.
//!
//! ## Public API
//!
//! - `AnalyticsEngine` / `DashboardReport`: all summary statistics in one call.
//! - `series`: forecast continuation, regression trend, sales and profit series.
//! - `metrics`, `distribution`, `profit`, `forecast`, `labels`: the individual calculations.

// Declare the modules that constitute this crate.
pub mod distribution;
pub mod engine;
pub mod forecast;
pub mod labels;
pub mod metrics;
pub mod profit;
pub mod report;
pub mod series;

// Re-export the key components to create a clean, public-facing API.
pub use distribution::{CategoryBreakdown, DistributionShape};
pub use engine::AnalyticsEngine;
pub use forecast::ForecastSummary;
pub use labels::DisplayTone;
pub use metrics::SalesSummary;
pub use profit::{ProfitDirection, ProfitTrendSummary};
pub use report::DashboardReport;
pub use series::{ForecastSeries, ProfitBar, SeriesPoint};
