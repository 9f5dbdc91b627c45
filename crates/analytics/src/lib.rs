//! # Cultivation Metrics
//!
//! This crate derives the productivity and financial indicators of a
//! cultivation cycle: weight gain, feed conversion ratio (FCA), survival,
//! cultivation days and harvest profitability.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   database or the UI. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The formulas in [`metrics`] are free functions and the
//!   `MetricsCalculator` only carries the feed cost constant. Every call takes a fully
//!   materialized snapshot of records and returns a new value.
//!
//! ## Public API
//!
//! - `metrics`: the individual formulas.
//! - `MetricsCalculator`: builds a `CycleReport` and settles harvests.
//! - `CycleReport`, `HarvestInput`, `HarvestEconomics`: the data it produces and consumes.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsCalculator;
pub use error::AnalyticsError;
pub use metrics::{DEFAULT_FEED_COST_PER_KG, HarvestEconomics};
pub use report::{CycleReport, HarvestInput};
