use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Record {record} belongs to cycle {found}, not to cycle {expected}")]
    ForeignRecord {
        record: Uuid,
        expected: Uuid,
        found: Uuid,
    },

    #[error("Invalid harvest input for {0}: {1}")]
    InvalidHarvest(String, String),

    #[error("Feed cost per kg cannot be negative (got {0})")]
    NegativeFeedCost(Decimal),

    #[error("The {0} of this harvest is too large to represent")]
    Overflow(&'static str),

    #[error(transparent)]
    Core(#[from] core_types::CoreError),
}
