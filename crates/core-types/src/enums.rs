use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a cultivation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[serde(alias = "ativo")]
    Active,
    #[serde(alias = "finalizado")]
    Finalized,
}

impl CycleStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CycleStatus::Active)
    }
}

/// Direction of a finance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    #[serde(alias = "entrada")]
    Inflow,
    #[serde(alias = "saida")]
    Outflow,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowDirection::Inflow => write!(f, "inflow"),
            FlowDirection::Outflow => write!(f, "outflow"),
        }
    }
}

/// Risk tier assigned to a cycle. Variants are ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Normal => write!(f, "normal"),
            RiskLevel::Warning => write!(f, "warning"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}
