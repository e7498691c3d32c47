//! # Salescope Core Types
//!
//! The shared vocabulary of the workspace: the payload shapes returned by the analytics
//! service and the small value types (`YearMonth`, provenance and label enums) that every
//! other crate speaks.
//!
//! This crate has no knowledge of HTTP, configuration or async runtimes.

pub mod enums;
pub mod error;
pub mod period;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ConfidenceLevel, Provenance, TrendDirection};
pub use error::CoreError;
pub use period::YearMonth;
pub use structs::{
    CategorySalesPoint, ConfidenceMetrics, ForecastComponents, ForecastPayload, ForecastResult,
    MonthlySalesPoint, ProfitPoint, TrendAnalysis,
};
