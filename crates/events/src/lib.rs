//! # Salescope Events
//!
//! This crate defines the state snapshot published to dashboard readers and the control
//! signals that ask for a new one.
//!
//! It depends only on `core-types` and is the definitive language between the aggregation
//! engine and everything that renders its output.

// Declare the modules that make up this crate.
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use messages::{DashboardData, DashboardSignal, DashboardState};
