//! # Report Aggregation
//!
//! Groups finance and cycle records into the series the charts and exporters
//! consume. Outputs keep a stable field order and carry raw `Decimal` values;
//! formatting belongs to the caller.

pub mod aggregator;
pub mod comparison;
pub mod error;
pub mod summary;

pub use aggregator::{DailyFlow, MonthTotal, daily_series, group_by_category, group_by_month};
pub use comparison::{ComparisonSummary, CycleComparisonRow, comparison_summary};
pub use error::ReportError;
pub use summary::{FinanceFilter, Period, PeriodSummary, period_summary};
