//! Maintenance schedule types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Work-order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Lifecycle state of a maintenance item relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Completed,
    Monitoring,
    Scheduled,
    Due,
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceStatus::Completed => write!(f, "Completed"),
            MaintenanceStatus::Monitoring => write!(f, "Monitoring"),
            MaintenanceStatus::Scheduled => write!(f, "Scheduled"),
            MaintenanceStatus::Due => write!(f, "Due"),
        }
    }
}

/// One predicted maintenance task.
///
/// Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceItem {
    /// Component or system the work applies to
    pub component: String,
    pub message: String,
    pub last_service: NaiveDate,
    pub next_service: NaiveDate,
    /// Human-readable duration estimate, e.g. "4 hours"
    pub duration: String,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    /// Predicted remaining useful life
    pub rul_days: u32,
}
