//! Aeolus: Wind Turbine Predictive Maintenance
//!
//! Scoring engine that turns turbine sensor readings into failure risk,
//! component health with trends, remaining useful life, a maintenance
//! schedule and an overall system status.
//!
//! ## Architecture
//!
//! - **Feature Adapter**: maps readings onto the classifier's feature vector
//! - **Failure Estimator**: ensemble probability, risk level, actions
//! - **Component Health**: ML-blended scorer with trend memory, penalty model, outlook
//! - **Maintenance**: health-based RUL and trend-based schedule
//! - **Status**: overall verdict, recommendations and alerts
//!
//! Model capabilities and sample inputs are injected; the engine itself is
//! deterministic.

pub mod api;
pub mod config;
pub mod engine;
pub mod estimator;
pub mod features;
pub mod health;
pub mod maintenance;
pub mod models;
pub mod simulation;
pub mod status;
pub mod types;

// Re-export engine configuration
pub use config::EngineConfig;

// Re-export the engine
pub use engine::{AnalyticsSummary, AssessmentReport, CycleReport, MaintenanceEngine};

// Re-export capabilities
pub use estimator::{FailureClassifier, FailureEstimator, FeatureScaler, ModelError, ModelSet, SequenceModel};
pub use simulation::{RandomSampleSource, SampleSource, ScriptedSampleSource};

// Re-export commonly used types
pub use types::{
    Alert, Component, ComponentHealth, ComponentHealthSet, FailureEstimate, MaintenanceItem,
    OverallStatus, RiskLevel, SensorReading, SystemStatus, Trend,
};
