//! End-to-end regression tests for the maintenance engine.
//!
//! Drives `MaintenanceEngine` through the public API only: point assessments,
//! full scoring cycles with scripted trend windows, on-disk model bundles, and
//! the degraded paths that must still produce a complete report.

use std::sync::Arc;

use aeolus::estimator::{
    FailureClassifier, ModelError, ACTION_CHECK_GEARBOX_OIL, ACTION_CHECK_ROTOR_SPEED, ACTION_CONTINUE,
    ACTION_IMMEDIATE_INSPECTION, ACTION_MONITOR_NACELLE,
};
use aeolus::models;
use aeolus::types::{MaintenanceStatus, OverallStatus, Trend};
use aeolus::{
    Component, EngineConfig, MaintenanceEngine, ModelSet, RandomSampleSource, RiskLevel, SampleSource,
    ScriptedSampleSource, SensorReading,
};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn nominal_reading() -> SensorReading {
    SensorReading {
        wind_speed: 12.0,
        power_output: 1800.0,
        rotor_rpm: 15.0,
        nacelle_temp: 45.0,
        gear_oil_temp: 60.0,
        generator_temp: 70.0,
        blade_pitch: 4.0,
        yaw_angle: 180.0,
        voltage_l1: 400.0,
        voltage_l2: 400.0,
        voltage_l3: 400.0,
        current_l1: 120.0,
        current_l2: 120.0,
        current_l3: 120.0,
        gear_oil_pressure: 2.6,
        ambient_temp: 15.0,
        humidity: 60.0,
        wind_direction: 180.0,
        timestamp: Some("2024-06-01T12:00:00Z".to_string()),
    }
}

fn scripted(config: &EngineConfig) -> ScriptedSampleSource {
    ScriptedSampleSource::new(vec![nominal_reading()])
        .flat_windows(&config.schedule.items, config.schedule.window_len)
}

struct FixedClassifier(f64);

impl FailureClassifier for FixedClassifier {
    fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], ModelError> {
        Ok([1.0 - self.0, self.0])
    }
}

// ============================================================================
// Point assessment
// ============================================================================

#[test]
fn test_assessment_without_models_uses_default_probabilities() {
    let engine = MaintenanceEngine::new(EngineConfig::default(), ModelSet::default());
    let report = engine.assess(&nominal_reading(), today());

    assert!((report.estimate.failure_probability - 0.125).abs() < 1e-9);
    assert!(!report.estimate.failure_prediction);
    assert_eq!(report.estimate.risk_level, RiskLevel::Low);
    assert_eq!(report.estimate.recommended_actions, vec![ACTION_CONTINUE.to_string()]);
    assert_eq!(report.next_maintenance_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

    // Nothing breached: every penalty component at 100, full baseline RUL
    assert_eq!(report.component_health.overall, 100.0);
    assert_eq!(report.rul_estimates["gearbox"], 8_760);
    assert_eq!(report.rul_estimates["nacelle"], 13_140);
}

#[test]
fn test_assessment_json_is_flat() {
    let engine = MaintenanceEngine::new(EngineConfig::default(), ModelSet::default());
    let json = serde_json::to_value(engine.assess(&nominal_reading(), today())).unwrap();

    for key in [
        "failure_probability",
        "failure_prediction",
        "confidence",
        "risk_level",
        "recommended_actions",
        "model_details",
        "next_maintenance_date",
        "component_health",
        "rul_estimates",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["risk_level"], "LOW");
    assert_eq!(json["next_maintenance_date"], "2024-07-01");
}

#[test]
fn test_high_risk_reading_lists_every_triggered_action() {
    let engine = MaintenanceEngine::new(
        EngineConfig::default(),
        ModelSet::default().with_classifier(Arc::new(FixedClassifier(1.0))),
    );
    let reading = SensorReading {
        gear_oil_temp: 90.0,
        nacelle_temp: 75.0,
        rotor_rpm: 28.0,
        ..nominal_reading()
    };

    let estimate = engine.estimate(&reading);

    // (1.0 + 0.15) / 2
    assert!((estimate.failure_probability - 0.575).abs() < 1e-9);
    assert!(estimate.failure_prediction);
    assert_eq!(estimate.risk_level, RiskLevel::Medium);
    assert_eq!(estimate.confidence, 1.0);
    assert_eq!(
        estimate.recommended_actions,
        vec![
            ACTION_IMMEDIATE_INSPECTION.to_string(),
            ACTION_CHECK_GEARBOX_OIL.to_string(),
            ACTION_MONITOR_NACELLE.to_string(),
            ACTION_CHECK_ROTOR_SPEED.to_string(),
        ]
    );
}

// ============================================================================
// Full cycle
// ============================================================================

#[test]
fn test_cycle_report_is_complete_and_ordered() {
    let config = EngineConfig::default();
    let samples = scripted(&config);
    let engine = MaintenanceEngine::new(config, ModelSet::default());

    let report = engine.run_cycle(&nominal_reading(), &samples, today());

    let order: Vec<Component> = report.components.iter().map(|e| e.component).collect();
    assert_eq!(order, Component::ALL.to_vec());
    assert!(report.components.iter().all(|e| e.score <= 100));
    assert!(report.components.iter().all(|e| e.trend == Trend::Stable));

    assert_eq!(report.maintenance.len(), 4);
    assert_eq!(report.maintenance[0].status, MaintenanceStatus::Due);
    assert_eq!(report.status.metrics.total_components, 6);
    assert_eq!(report.status.metrics.due_maintenance, 1);
    assert_ne!(report.status.status, OverallStatus::Unknown);
}

#[test]
fn test_repeated_cycle_reports_declining_trend() {
    let config = EngineConfig::default();
    let samples = scripted(&config);
    let engine = MaintenanceEngine::new(config, ModelSet::default());

    engine.run_cycle(&nominal_reading(), &samples, today());

    // Same reading with every factor zeroed drops each score well past the dead band
    let degraded = engine.run_cycle(&SensorReading::default(), &samples, today());
    assert!(degraded.components.iter().all(|e| e.trend == Trend::Declining));
    assert!(degraded.alert.alert);
    assert_eq!(degraded.alert.component.as_deref(), Some("Main Bearing"));
    assert_eq!(degraded.status.metrics.declining_components, 6);

    let steady = engine.run_cycle(&SensorReading::default(), &samples, today());
    assert!(steady.components.iter().all(|e| e.trend == Trend::Stable));
}

#[test]
fn test_non_finite_reading_still_yields_full_cycle() {
    let config = EngineConfig::default();
    let samples = scripted(&config);
    let engine = MaintenanceEngine::new(config, ModelSet::default());
    let reading = SensorReading {
        wind_speed: f64::NAN,
        ..nominal_reading()
    };

    let report = engine.run_cycle(&reading, &samples, today());

    // Estimator degrades to its fallback
    assert_eq!(report.estimate.failure_probability, 0.1);
    assert_eq!(report.estimate.confidence, 0.5);

    // Wind speed feeds main bearing and blade system factors
    assert_eq!(report.components.get(Component::MainBearing).map(|e| e.score), Some(0));
    assert_eq!(report.components.get(Component::BladeSystem).map(|e| e.score), Some(0));
    assert_eq!(report.alert.component.as_deref(), Some("Main Bearing"));
    assert_eq!(report.components.len(), 6);
}

#[test]
fn test_random_samples_produce_valid_schedule() {
    let config = EngineConfig::default();
    let engine = MaintenanceEngine::new(config.clone(), ModelSet::default());
    let samples = RandomSampleSource::new(Some(7));

    let reading = samples.reading();
    let schedule = engine.schedule(&samples, today());

    assert!(reading.wind_speed.is_finite());
    assert_eq!(schedule.len(), config.schedule.items.len());
    for item in &schedule {
        assert!(item.rul_days >= config.schedule.min_rul_days);
        assert!(item.next_service > today());
        assert!(item.last_service <= today());
    }
}

#[test]
fn test_outlook_covers_every_target() {
    let engine = MaintenanceEngine::new(EngineConfig::default(), ModelSet::default());
    let outlook = engine.outlook(&nominal_reading());

    let json = serde_json::to_value(&outlook).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 6);
    for (_, prediction) in outlook.iter() {
        assert!(prediction.confidence.ends_with('%'));
        assert!(!prediction.based_on.is_empty());
    }
}

// ============================================================================
// Model bundle
// ============================================================================

#[test]
fn test_bundle_classifier_drives_estimate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(models::CLASSIFIER_FILE),
        r#"{"weights": [0.0, 0.0], "bias": 0.0}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(models::FEATURE_NAMES_FILE),
        r#"["T01_WindSpeed_avg", "T01_Power_avg"]"#,
    )
    .unwrap();

    let engine = MaintenanceEngine::new(EngineConfig::default(), models::load_bundle(dir.path()));
    let estimate = engine.estimate(&nominal_reading());

    assert_eq!(estimate.model_details.classifier_probability, 0.5);
    assert_eq!(estimate.model_details.sequence_probability, 0.15);
    assert!((estimate.failure_probability - 0.325).abs() < 1e-9);
    // No sequence model in a bundle
    assert!(!engine.models_loaded());
}

#[test]
fn test_bundle_shape_mismatch_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(models::CLASSIFIER_FILE),
        r#"{"weights": [0.1, 0.2, 0.3], "bias": 0.0, "feature_names": ["WindSpeed", "Power"]}"#,
    )
    .unwrap();

    let engine = MaintenanceEngine::new(EngineConfig::default(), models::load_bundle(dir.path()));
    let estimate = engine.estimate(&nominal_reading());

    assert_eq!(estimate.failure_probability, 0.1);
    assert_eq!(estimate.recommended_actions, vec![ACTION_CONTINUE.to_string()]);
}

#[test]
fn test_empty_bundle_dir_serves_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let models = models::load_bundle(dir.path());

    assert!(models.classifier.is_none());
    assert!(models.scaler.is_none());

    let engine = MaintenanceEngine::new(EngineConfig::default(), models);
    assert!((engine.estimate(&nominal_reading()).failure_probability - 0.125).abs() < 1e-9);
}
