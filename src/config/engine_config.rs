//! Engine Configuration - every scoring threshold as an operator-tunable TOML value
//!
//! Base scores, penalty amounts, RUL baselines, ladder thresholds and schedule
//! items all live here instead of inline in the scoring code. Each section
//! implements `Default` with the values in [`super::defaults`], so a missing
//! config file yields the stock behavior.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::{Component, SensorField};

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "AEOLUS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "aeolus.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one engine deployment.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$AEOLUS_CONFIG` env var
/// 2. `./aeolus.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Turbine identification
    #[serde(default)]
    pub turbine: TurbineInfo,

    /// Failure estimator thresholds and capability defaults
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Feature adapter sizing
    #[serde(default)]
    pub features: FeatureConfig,

    /// ML-blended component health table
    #[serde(default)]
    pub health: HealthConfig,

    /// Deterministic penalty health model
    #[serde(default)]
    pub penalty: PenaltyConfig,

    /// Health-based RUL baselines
    #[serde(default)]
    pub rul: RulConfig,

    /// Trend-based maintenance schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// System status ladder
    #[serde(default)]
    pub status: StatusConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$AEOLUS_CONFIG` environment variable
    /// 2. `./aeolus.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// Defaults apply only when no config file is present. A file that exists
    /// but fails to read, parse or validate is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from_search(env_path.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order behind [`EngineConfig::load`] with explicit locations.
    ///
    /// An env path naming a missing file is skipped with a warning.
    pub fn load_from_search(env_path: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        if let Some(p) = env_path {
            if p.exists() {
                let config = Self::load_from_file(p)?;
                info!(path = %p.display(), turbine = %config.turbine.id, "Loaded engine config from AEOLUS_CONFIG");
                return Ok(config);
            }
            warn!(path = %p.display(), "AEOLUS_CONFIG points to non-existent file, falling back");
        }

        if local.exists() {
            let config = Self::load_from_file(local)?;
            info!(path = %local.display(), turbine = %config.turbine.id, "Loaded engine config from working directory");
            return Ok(config);
        }

        info!("No aeolus.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    ///
    /// Unknown keys are reported as warnings only; semantic problems are errors.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all thresholds for internal consistency.
    ///
    /// Rules:
    /// - Probabilities lie in [0, 1] and risk thresholds escalate
    /// - Ensemble weights are non-negative with a positive sum
    /// - The component table is non-empty, unique, with positive nominal maxima
    /// - Schedule windows escalate (due <= scheduled <= monitoring)
    /// - Status ladder averages descend (optimal >= good >= fair >= poor)
    /// - `health.critical_score` and `status.critical_score` agree
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Estimator
        let e = &self.estimator;
        for (name, p) in [
            ("estimator.default_classifier_probability", e.default_classifier_probability),
            ("estimator.default_sequence_probability", e.default_sequence_probability),
            ("estimator.failure_threshold", e.failure_threshold),
            ("estimator.medium_risk_threshold", e.medium_risk_threshold),
            ("estimator.high_risk_threshold", e.high_risk_threshold),
            ("estimator.fallback_probability", e.fallback_probability),
            ("estimator.fallback_confidence", e.fallback_confidence),
        ] {
            Self::check_probability(p, name, &mut errors);
        }
        Self::check_escalation(
            e.medium_risk_threshold,
            e.high_risk_threshold,
            "estimator.risk_threshold",
            &mut errors,
        );
        if e.classifier_weight < 0.0 || e.sequence_weight < 0.0 {
            errors.push("estimator weights must be >= 0".to_string());
        }
        if e.classifier_weight + e.sequence_weight <= 0.0 {
            errors.push(format!(
                "estimator weights must have a positive sum, got {:.2}",
                e.classifier_weight + e.sequence_weight
            ));
        }

        // Features
        if self.features.max_features == 0 {
            errors.push("features.max_features must be > 0".to_string());
        }

        // Health table
        let h = &self.health;
        if h.components.is_empty() {
            errors.push("health.components must list at least one component".to_string());
        }
        let mut seen = HashSet::new();
        for spec in &h.components {
            if !seen.insert(spec.component) {
                errors.push(format!("health.components lists {} twice", spec.component));
            }
            if !(0.0..=100.0).contains(&spec.base_score) {
                errors.push(format!(
                    "health.components[{}].base_score ({:.1}) must be within 0-100",
                    spec.component, spec.base_score
                ));
            }
            for factor in &spec.factors {
                if factor.nominal_max <= 0.0 {
                    errors.push(format!(
                        "health.components[{}]: nominal_max for {:?} must be > 0 (used as divisor)",
                        spec.component, factor.field
                    ));
                }
            }
        }
        if h.trend_dead_band < 0.0 {
            errors.push("health.trend_dead_band must be >= 0".to_string());
        }

        // Penalty deductions
        let p = &self.penalty;
        for (name, v) in [
            ("penalty.gear_oil_temp_penalty", p.gear_oil_temp_penalty),
            ("penalty.oil_pressure_penalty", p.oil_pressure_penalty),
            ("penalty.generator_temp_penalty", p.generator_temp_penalty),
            ("penalty.blade_pitch_penalty", p.blade_pitch_penalty),
            ("penalty.nacelle_temp_penalty", p.nacelle_temp_penalty),
        ] {
            if v < 0.0 {
                errors.push(format!("{name} must be >= 0"));
            }
        }

        // RUL
        for (component, hours) in &self.rul.baseline_hours {
            if *hours == 0 {
                errors.push(format!("rul.baseline_hours.{component} must be > 0"));
            }
        }
        if !(0.0..=100.0).contains(&self.rul.fallback_health_percent) {
            errors.push("rul.fallback_health_percent must be within 0-100".to_string());
        }

        // Schedule
        let s = &self.schedule;
        if s.window_len < 2 {
            errors.push("schedule.window_len must be >= 2".to_string());
        }
        if s.min_rul_days == 0 {
            errors.push("schedule.min_rul_days must be > 0".to_string());
        }
        if !(s.due_within_days <= s.scheduled_within_days
            && s.scheduled_within_days <= s.monitoring_within_days)
        {
            errors.push(format!(
                "schedule windows must escalate: due ({}) <= scheduled ({}) <= monitoring ({})",
                s.due_within_days, s.scheduled_within_days, s.monitoring_within_days
            ));
        }
        for item in &s.items {
            if item.factor_count == 0 {
                errors.push(format!("schedule.items[{}].factor_count must be > 0", item.component));
            }
        }

        // Status ladder
        let st = &self.status;
        if !(st.optimal_min_average >= st.good_min_average
            && st.good_min_average >= st.fair_min_average
            && st.fair_min_average >= st.poor_min_average)
        {
            errors.push("status ladder averages must descend: optimal >= good >= fair >= poor".to_string());
        }
        // The alert and the ladder must count the same components as critical
        if st.critical_score != h.critical_score {
            errors.push(format!(
                "status.critical_score ({}) must equal health.critical_score ({})",
                st.critical_score, h.critical_score
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            let bad = super::validation::non_finite_keys(&value, "");
            if !bad.is_empty() {
                errors.push(format!(
                    "Config contains NaN or Inf values ({}); all thresholds must be finite numbers",
                    bad.join(", ")
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_probability(value: f64, name: &str, errors: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("{name} ({value}) must be within 0-1"));
        }
    }

    fn check_escalation(lower: f64, upper: f64, name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass
        if !lower.is_finite() || !upper.is_finite() {
            errors.push(format!("{name}: values must be finite (got {lower}, {upper})"));
            return;
        }
        if upper < lower {
            errors.push(format!("{name}: upper ({upper:.3}) must be >= lower ({lower:.3})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed:\n{}", bullet_list(.0))]
    Validation(Vec<String>),
}

fn bullet_list(errors: &[String]) -> String {
    errors.iter().map(|e| format!("  - {e}\n")).collect()
}

// ============================================================================
// Turbine Info
// ============================================================================

/// Identification metadata. Not used for logic, only in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbineInfo {
    pub id: String,
    pub site: String,
}

impl Default for TurbineInfo {
    fn default() -> Self {
        Self {
            id: "Turbine-1".to_string(),
            site: String::new(),
        }
    }
}

// ============================================================================
// Failure Estimator
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Classifier P(failure) when no classifier is loaded
    pub default_classifier_probability: f64,
    /// Sequence-model P(failure) when no sequence model is loaded
    pub default_sequence_probability: f64,
    /// Ensemble weight of the classifier
    pub classifier_weight: f64,
    /// Ensemble weight of the sequence model
    pub sequence_weight: f64,
    /// Ensemble probability above which failure is predicted
    pub failure_threshold: f64,
    pub medium_risk_threshold: f64,
    pub high_risk_threshold: f64,
    pub gear_oil_temp_action_c: f64,
    pub nacelle_temp_action_c: f64,
    pub rotor_rpm_action: f64,
    pub fallback_probability: f64,
    pub fallback_confidence: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_classifier_probability: defaults::DEFAULT_CLASSIFIER_PROBABILITY,
            default_sequence_probability: defaults::DEFAULT_SEQUENCE_PROBABILITY,
            classifier_weight: 0.5,
            sequence_weight: 0.5,
            failure_threshold: defaults::FAILURE_THRESHOLD,
            medium_risk_threshold: defaults::MEDIUM_RISK_THRESHOLD,
            high_risk_threshold: defaults::HIGH_RISK_THRESHOLD,
            gear_oil_temp_action_c: defaults::GEAR_OIL_TEMP_ACTION_C,
            nacelle_temp_action_c: defaults::NACELLE_TEMP_ACTION_C,
            rotor_rpm_action: defaults::ROTOR_RPM_ACTION,
            fallback_probability: defaults::FALLBACK_PROBABILITY,
            fallback_confidence: defaults::FALLBACK_CONFIDENCE,
        }
    }
}

// ============================================================================
// Feature Adapter
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// How many entries of the model's expected-feature list are used
    pub max_features: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_features: defaults::MAX_MODEL_FEATURES,
        }
    }
}

// ============================================================================
// Component Health (ML-blended)
// ============================================================================

/// One input factor: a reading field divided by its nominal maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorSpec {
    pub field: SensorField,
    pub nominal_max: f64,
    /// Use the magnitude of the reading (signed angles)
    #[serde(default)]
    pub absolute: bool,
}

impl FactorSpec {
    pub const fn new(field: SensorField, nominal_max: f64) -> Self {
        Self { field, nominal_max, absolute: false }
    }

    pub const fn absolute(field: SensorField, nominal_max: f64) -> Self {
        Self { field, nominal_max, absolute: true }
    }
}

/// Row of the component table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub component: Component,
    pub base_score: f64,
    #[serde(default)]
    pub factors: Vec<FactorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Points awarded at zero failure probability
    pub ml_weight: f64,
    /// Points awarded at a mean factor of 1.0
    pub factor_weight: f64,
    /// Scores below this are critical and raise an alert
    pub critical_score: u8,
    /// Score deltas below this are a stable trend
    pub trend_dead_band: f64,
    /// Scored components, in reporting order
    pub components: Vec<ComponentSpec>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        use SensorField as F;
        Self {
            ml_weight: defaults::ML_TERM_WEIGHT,
            factor_weight: defaults::FACTOR_TERM_WEIGHT,
            critical_score: defaults::CRITICAL_HEALTH_SCORE,
            trend_dead_band: defaults::TREND_DEAD_BAND,
            components: vec![
                ComponentSpec {
                    component: Component::MainBearing,
                    base_score: 70.0,
                    factors: vec![FactorSpec::new(F::RotorRpm, 30.0), FactorSpec::new(F::WindSpeed, 25.0)],
                },
                ComponentSpec {
                    component: Component::Gearbox,
                    base_score: 65.0,
                    factors: vec![FactorSpec::new(F::GearOilTemp, 100.0), FactorSpec::new(F::GearOilPressure, 3.0)],
                },
                ComponentSpec {
                    component: Component::Generator,
                    base_score: 68.0,
                    factors: vec![FactorSpec::new(F::GeneratorTemp, 120.0), FactorSpec::new(F::PowerOutput, 3000.0)],
                },
                ComponentSpec {
                    component: Component::PowerElectronics,
                    base_score: 66.0,
                    factors: vec![FactorSpec::new(F::VoltageL1, 400.0), FactorSpec::new(F::CurrentL1, 200.0)],
                },
                ComponentSpec {
                    component: Component::BladeSystem,
                    base_score: 64.0,
                    factors: vec![FactorSpec::absolute(F::BladePitch, 90.0), FactorSpec::new(F::WindSpeed, 25.0)],
                },
                ComponentSpec {
                    component: Component::ControlSystem,
                    base_score: 72.0,
                    factors: vec![FactorSpec::new(F::YawAngle, 360.0), FactorSpec::new(F::NacelleTemp, 100.0)],
                },
            ],
        }
    }
}

// ============================================================================
// Deterministic Penalty Model
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub gear_oil_temp_limit_c: f64,
    pub gear_oil_temp_penalty: f64,
    pub oil_pressure_min_bar: f64,
    pub oil_pressure_penalty: f64,
    pub generator_temp_limit_c: f64,
    pub generator_temp_penalty: f64,
    /// Limit on |blade_pitch| (degrees)
    pub blade_pitch_limit_deg: f64,
    pub blade_pitch_penalty: f64,
    pub nacelle_temp_limit_c: f64,
    pub nacelle_temp_penalty: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            gear_oil_temp_limit_c: 80.0,
            gear_oil_temp_penalty: 20.0,
            oil_pressure_min_bar: 2.0,
            oil_pressure_penalty: 15.0,
            generator_temp_limit_c: 85.0,
            generator_temp_penalty: 25.0,
            blade_pitch_limit_deg: 90.0,
            blade_pitch_penalty: 10.0,
            nacelle_temp_limit_c: 70.0,
            nacelle_temp_penalty: 15.0,
        }
    }
}

// ============================================================================
// Remaining Useful Life
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulConfig {
    /// RUL at 100% health, keyed by component name (hours)
    pub baseline_hours: BTreeMap<String, u32>,
    /// Health assumed for every baseline when the estimate falls back
    pub fallback_health_percent: f64,
}

impl Default for RulConfig {
    fn default() -> Self {
        let baseline_hours = [
            ("gearbox", defaults::GEARBOX_BASELINE_RUL_HOURS),
            ("generator", defaults::GENERATOR_BASELINE_RUL_HOURS),
            ("blades", defaults::BLADES_BASELINE_RUL_HOURS),
            ("nacelle", defaults::NACELLE_BASELINE_RUL_HOURS),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            baseline_hours,
            fallback_health_percent: defaults::FALLBACK_RUL_HEALTH_PERCENT,
        }
    }
}

// ============================================================================
// Maintenance Schedule
// ============================================================================

/// A maintenance task whose due date is predicted from trend data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceItemSpec {
    pub component: String,
    pub message: String,
    pub duration: String,
    /// RUL before the trend adjustment (days)
    pub baseline_rul_days: f64,
    /// Nominal gap between two services (days)
    pub service_interval_days: i64,
    /// Number of trend series sampled for this item
    pub factor_count: usize,
}

impl MaintenanceItemSpec {
    fn stock(
        component: &str,
        message: &str,
        duration: &str,
        baseline_rul_days: f64,
        service_interval_days: i64,
        factor_count: usize,
    ) -> Self {
        Self {
            component: component.to_string(),
            message: message.to_string(),
            duration: duration.to_string(),
            baseline_rul_days,
            service_interval_days,
            factor_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Samples per simulated trend series
    pub window_len: usize,
    /// Days of RUL per unit of averaged slope
    pub sensitivity_days: f64,
    pub min_rul_days: u32,
    pub due_within_days: i64,
    pub scheduled_within_days: i64,
    pub monitoring_within_days: i64,
    /// Next-maintenance horizon of a point assessment (days)
    pub assessment_horizon_days: i64,
    pub items: Vec<MaintenanceItemSpec>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window_len: defaults::TREND_WINDOW_LEN,
            sensitivity_days: defaults::TREND_SENSITIVITY_DAYS,
            min_rul_days: defaults::MIN_RUL_DAYS,
            due_within_days: defaults::DUE_WITHIN_DAYS,
            scheduled_within_days: defaults::SCHEDULED_WITHIN_DAYS,
            monitoring_within_days: defaults::MONITORING_WITHIN_DAYS,
            assessment_horizon_days: defaults::ASSESSMENT_HORIZON_DAYS,
            items: vec![
                MaintenanceItemSpec::stock(
                    "Gearbox Oil",
                    "Oil change and filter replacement required",
                    "4 hours",
                    6.0,
                    60,
                    3,
                ),
                MaintenanceItemSpec::stock(
                    "Blade Inspection",
                    "Visual inspection and surface treatment",
                    "6 hours",
                    25.0,
                    180,
                    3,
                ),
                MaintenanceItemSpec::stock(
                    "Generator Bearing",
                    "Bearing lubrication and alignment check",
                    "3 hours",
                    120.0,
                    180,
                    3,
                ),
                MaintenanceItemSpec::stock(
                    "Control System",
                    "Software update and sensor calibration",
                    "2 hours",
                    60.0,
                    90,
                    2,
                ),
            ],
        }
    }
}

// ============================================================================
// System Status Ladder
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Scores below this count as critical components
    pub critical_score: u8,
    pub optimal_min_average: f64,
    pub good_min_average: f64,
    pub good_max_critical: usize,
    pub good_max_declining: usize,
    pub fair_min_average: f64,
    pub fair_max_critical: usize,
    pub poor_min_average: f64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            critical_score: defaults::CRITICAL_HEALTH_SCORE,
            optimal_min_average: 90.0,
            good_min_average: 80.0,
            good_max_critical: 1,
            good_max_declining: 1,
            fair_min_average: 70.0,
            fair_max_critical: 2,
            poor_min_average: 60.0,
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `AEOLUS_SERVER_ADDR` env var or `--addr` CLI flag.
    pub addr: String,
    /// Origins allowed by CORS (the dashboard dev servers by default)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: defaults::SERVER_ADDR.to_string(),
            cors_origins: defaults::CORS_ORIGINS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
