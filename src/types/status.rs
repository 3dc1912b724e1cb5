//! System Status Aggregator output types: OverallStatus, SystemStatus, Alert

use serde::{Deserialize, Serialize};

/// Overall turbine verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallStatus {
    Optimal,
    Good,
    Fair,
    Poor,
    Critical,
    /// No health data to aggregate
    Unknown,
}

impl OverallStatus {
    /// Lowercase severity tag shown next to the status.
    pub const fn severity(self) -> &'static str {
        match self {
            OverallStatus::Optimal => "optimal",
            OverallStatus::Good => "good",
            OverallStatus::Fair => "fair",
            OverallStatus::Poor => "poor",
            OverallStatus::Critical => "critical",
            OverallStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OverallStatus::Optimal => "Optimal",
            OverallStatus::Good => "Good",
            OverallStatus::Fair => "Fair",
            OverallStatus::Poor => "Poor",
            OverallStatus::Critical => "Critical",
            OverallStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Aggregate counters behind a status verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StatusMetrics {
    pub average_health: f64,
    /// Components scoring below the critical score
    pub critical_components: usize,
    pub declining_components: usize,
    /// Maintenance items with status `Due`
    pub due_maintenance: usize,
    pub total_components: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: OverallStatus,
    pub severity: String,
    pub message: String,
    pub recommendations: Vec<String>,
    pub metrics: StatusMetrics,
}

/// First component needing attention, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Alert {
    pub alert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Alert {
    pub fn none() -> Self {
        Self::default()
    }
}
