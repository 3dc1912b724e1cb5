//! System-wide default constants.
//!
//! Every value here is the built-in default for a field in [`super::EngineConfig`].
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Failure Estimator
// ============================================================================

/// Classifier probability used when no classifier capability is loaded.
pub const DEFAULT_CLASSIFIER_PROBABILITY: f64 = 0.1;

/// Sequence-model probability used when no sequence capability is loaded.
pub const DEFAULT_SEQUENCE_PROBABILITY: f64 = 0.15;

/// Ensemble probability above which a failure is predicted.
pub const FAILURE_THRESHOLD: f64 = 0.5;

/// Probability above which risk is MEDIUM.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Probability above which risk is HIGH.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Gearbox oil temperature that triggers a gearbox check (°C).
pub const GEAR_OIL_TEMP_ACTION_C: f64 = 80.0;

/// Nacelle temperature that triggers nacelle monitoring (°C).
pub const NACELLE_TEMP_ACTION_C: f64 = 70.0;

/// Rotor speed that triggers a rotor parameter check (RPM).
pub const ROTOR_RPM_ACTION: f64 = 25.0;

/// Probability reported when the estimator degrades to its fallback.
pub const FALLBACK_PROBABILITY: f64 = 0.1;

/// Confidence reported when the estimator degrades to its fallback.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

// ============================================================================
// Feature Adapter
// ============================================================================

/// Number of expected feature identifiers consumed from the model's list.
pub const MAX_MODEL_FEATURES: usize = 10;

// ============================================================================
// Component Health
// ============================================================================

/// Points contributed by a zero failure probability.
pub const ML_TERM_WEIGHT: f64 = 20.0;

/// Points contributed by a mean factor of 1.0.
pub const FACTOR_TERM_WEIGHT: f64 = 10.0;

/// Health score below which a component counts as critical and raises an alert.
pub const CRITICAL_HEALTH_SCORE: u8 = 80;

/// Score changes smaller than this are reported as a stable trend.
pub const TREND_DEAD_BAND: f64 = 1.0;

// ============================================================================
// Remaining Useful Life
// ============================================================================

/// Gearbox baseline RUL at full health (hours). 8 760 = 1 year.
pub const GEARBOX_BASELINE_RUL_HOURS: u32 = 8_760;

/// Generator baseline RUL at full health (hours). 17 520 = 2 years.
pub const GENERATOR_BASELINE_RUL_HOURS: u32 = 17_520;

/// Blade baseline RUL at full health (hours). 26 280 = 3 years.
pub const BLADES_BASELINE_RUL_HOURS: u32 = 26_280;

/// Nacelle baseline RUL at full health (hours). 13 140 = 1.5 years.
pub const NACELLE_BASELINE_RUL_HOURS: u32 = 13_140;

/// Health assumed for every component when the RUL estimate falls back.
pub const FALLBACK_RUL_HEALTH_PERCENT: f64 = 50.0;

// ============================================================================
// Maintenance Schedule
// ============================================================================

/// Length of the simulated trend window (samples, one per day).
pub const TREND_WINDOW_LEN: usize = 30;

/// Days of RUL added per unit of averaged factor slope.
pub const TREND_SENSITIVITY_DAYS: f64 = 30.0;

/// Predicted RUL never drops below this (days).
pub const MIN_RUL_DAYS: u32 = 1;

/// Items due within this many days are `Due` / `High`.
pub const DUE_WITHIN_DAYS: i64 = 7;

/// Items due within this many days are `Scheduled` / `Medium`.
pub const SCHEDULED_WITHIN_DAYS: i64 = 30;

/// Items due within this many days are `Monitoring` / `Low`.
pub const MONITORING_WITHIN_DAYS: i64 = 90;

/// Horizon used for the next maintenance date of a point assessment (days).
pub const ASSESSMENT_HORIZON_DAYS: i64 = 30;

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8000";

/// Dashboard dev-server origins allowed by default.
pub const CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];
