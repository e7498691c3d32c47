//! # Salescope Engine
//!
//! The aggregation engine. [`Aggregator`] runs one refresh cycle against the analytics
//! service; [`DashboardStore`] owns the published [`events::DashboardState`] and is the
//! only thing that writes it.

pub mod error;
pub mod orchestrator;
pub mod store;

pub use error::EngineError;
pub use orchestrator::{Aggregator, FetchFailure, FetchOutcome, RefreshOutcome};
pub use store::{DashboardStore, run_signal_loop};
