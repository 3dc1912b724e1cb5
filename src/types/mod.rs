//! Shared data structures for the turbine predictive-maintenance engine
//!
//! This module defines the values that flow through one scoring cycle:
//! - Input: SensorReading (one turbine snapshot)
//! - Failure Estimator output: FailureEstimate, RiskLevel
//! - Component Health Scorer output: ComponentHealth, ComponentHealthSet, Trend
//! - Deterministic penalty model output: PenaltyHealthReport
//! - Scheduler output: MaintenanceItem
//! - Aggregator output: SystemStatus, Alert
//! - Component outlook: ComponentOutlook

mod sensor;
mod estimate;
mod health;
mod maintenance;
mod outlook;
mod status;

pub use sensor::*;
pub use estimate::*;
pub use health::*;
pub use maintenance::*;
pub use outlook::*;
pub use status::*;
