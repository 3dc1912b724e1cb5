//! Maintenance Engine - orchestrates one scoring pass
//!
//! ```text
//! SensorReading ──► FeatureAdapter ──► FailureEstimator ──► ComponentHealthScorer
//!                                             │                      │
//!                                             ▼                      ▼
//!                                   penalty health + RUL    MaintenanceScheduler
//!                                     (assessment)                   │
//!                                                                    ▼
//!                                                       status::aggregate + alert
//! ```
//!
//! Every operation is total. The only state carried between calls is the
//! scorer's previous-score table.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::estimator::{FailureEstimator, ModelSet};
use crate::features::FeatureAdapter;
use crate::health::{component_outlook, score_penalties, ComponentHealthScorer};
use crate::maintenance::{estimate_rul, MaintenanceScheduler};
use crate::simulation::SampleSource;
use crate::status;
use crate::types::{
    Alert, ComponentHealthSet, ComponentOutlook, FailureEstimate, MaintenanceItem, MaintenanceStatus,
    PenaltyHealthReport, RiskLevel, SensorReading, SystemStatus,
};

/// Point assessment of one reading (deterministic-penalty health path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub estimate: FailureEstimate,
    pub next_maintenance_date: NaiveDate,
    pub component_health: PenaltyHealthReport,
    /// Remaining useful life per component (hours)
    pub rul_estimates: BTreeMap<String, u32>,
}

/// Result of one full scoring cycle (ML-blended health path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub estimate: FailureEstimate,
    pub components: ComponentHealthSet,
    pub alert: Alert,
    pub maintenance: Vec<MaintenanceItem>,
    pub status: SystemStatus,
}

/// Dashboard rollup of the estimate and the maintenance schedule.
///
/// Stateless: derived without touching the scorer's trend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub turbine: String,
    /// Schedule items in the Scheduled window
    pub scheduled_maintenance: usize,
    /// Schedule items already Due
    pub overdue_maintenance: usize,
    /// 1 when the estimate predicts a failure
    pub predicted_failures: usize,
    pub failure_probability: f64,
    pub risk_level: RiskLevel,
    /// Overall penalty-model health (0-100)
    pub average_health: f64,
    /// kW, from the assessed reading
    pub power_output: f64,
}

pub struct MaintenanceEngine {
    config: EngineConfig,
    adapter: FeatureAdapter,
    estimator: FailureEstimator,
    scorer: ComponentHealthScorer,
    scheduler: MaintenanceScheduler,
}

impl MaintenanceEngine {
    pub fn new(config: EngineConfig, models: ModelSet) -> Self {
        info!(
            turbine = %config.turbine.id,
            components = config.health.components.len(),
            schedule_items = config.schedule.items.len(),
            ?models,
            "Maintenance engine initialized"
        );
        Self {
            adapter: FeatureAdapter::new(config.features.max_features),
            estimator: FailureEstimator::new(config.estimator.clone(), models),
            scorer: ComponentHealthScorer::new(config.health.clone()),
            scheduler: MaintenanceScheduler::new(config.schedule.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True when both the classifier and the sequence model are present.
    pub fn models_loaded(&self) -> bool {
        self.estimator.models().all_models_loaded()
    }

    pub fn scorer(&self) -> &ComponentHealthScorer {
        &self.scorer
    }

    /// Adapt the reading and estimate failure risk.
    pub fn estimate(&self, reading: &SensorReading) -> FailureEstimate {
        let features = self
            .adapter
            .adapt(reading, self.estimator.models().feature_names());
        self.estimator.estimate(reading, &features)
    }

    /// Failure estimate plus penalty health, RUL and next maintenance date.
    pub fn assess(&self, reading: &SensorReading, today: NaiveDate) -> AssessmentReport {
        let estimate = self.estimate(reading);
        let component_health = score_penalties(reading, &self.config.penalty);
        let rul_estimates = estimate_rul(component_health.component_scores(), &self.config.rul);
        let horizon = self.config.schedule.assessment_horizon_days.max(0).unsigned_abs();
        let next_maintenance_date = today.checked_add_days(Days::new(horizon)).unwrap_or(today);

        debug!(
            probability = estimate.failure_probability,
            risk = %estimate.risk_level,
            overall_health = component_health.overall,
            "Assessment complete"
        );

        AssessmentReport {
            estimate,
            next_maintenance_date,
            component_health,
            rul_estimates,
        }
    }

    /// One full cycle: estimate, ML-blended health with trend update,
    /// alert, trend-based schedule and system status.
    pub fn run_cycle(&self, reading: &SensorReading, samples: &dyn SampleSource, today: NaiveDate) -> CycleReport {
        let estimate = self.estimate(reading);
        let factors = self.scorer.factors_from_reading(reading);
        let components = self.scorer.score(&factors, estimate.failure_probability);
        let alert = status::detect_alert(&components, self.config.health.critical_score);
        let maintenance = self.scheduler.schedule(samples, today);
        let status = status::aggregate(&components, &maintenance, &self.config.status);

        info!(
            turbine = %self.config.turbine.id,
            status = %status.status,
            risk = %estimate.risk_level,
            alert = alert.alert,
            "Health cycle complete"
        );

        CycleReport {
            estimate,
            components,
            alert,
            maintenance,
            status,
        }
    }

    /// Counts and headline figures for the analytics dashboard.
    pub fn analytics(&self, reading: &SensorReading, samples: &dyn SampleSource, today: NaiveDate) -> AnalyticsSummary {
        let estimate = self.estimate(reading);
        let maintenance = self.scheduler.schedule(samples, today);
        let count = |status: MaintenanceStatus| maintenance.iter().filter(|m| m.status == status).count();

        AnalyticsSummary {
            turbine: self.config.turbine.id.clone(),
            scheduled_maintenance: count(MaintenanceStatus::Scheduled),
            overdue_maintenance: count(MaintenanceStatus::Due),
            predicted_failures: usize::from(estimate.failure_prediction),
            failure_probability: estimate.failure_probability,
            risk_level: estimate.risk_level,
            average_health: score_penalties(reading, &self.config.penalty).overall,
            power_output: reading.power_output,
        }
    }

    /// Per-target outlook driven by the classifier probability.
    pub fn outlook(&self, reading: &SensorReading) -> ComponentOutlook {
        let estimate = self.estimate(reading);
        component_outlook(
            reading,
            estimate.model_details.classifier_probability,
            self.config.estimator.medium_risk_threshold,
            self.config.estimator.high_risk_threshold,
        )
    }

    /// Trend-based maintenance schedule.
    pub fn schedule(&self, samples: &dyn SampleSource, today: NaiveDate) -> Vec<MaintenanceItem> {
        self.scheduler.schedule(samples, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{FailureClassifier, ModelError};
    use crate::simulation::ScriptedSampleSource;
    use crate::types::{Component, OverallStatus, RiskLevel, Trend};
    use std::sync::Arc;

    struct Fixed(f64);

    impl FailureClassifier for Fixed {
        fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], ModelError> {
            Ok([1.0 - self.0, self.0])
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn hot() -> SensorReading {
        SensorReading {
            gear_oil_temp: 85.0,
            gear_oil_pressure: 2.4,
            generator_temp: 90.0,
            nacelle_temp: 75.0,
            rotor_rpm: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_assess_combines_estimate_penalties_and_rul() {
        let engine = MaintenanceEngine::new(EngineConfig::default(), ModelSet::default());
        let report = engine.assess(&hot(), today());

        assert_eq!(report.next_maintenance_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(report.component_health.gearbox, 80.0);
        assert_eq!(report.component_health.generator, 75.0);
        assert_eq!(report.rul_estimates["gearbox"], 7008);
        assert_eq!(report.rul_estimates["generator"], 13_140);
        assert_eq!(report.estimate.risk_level, RiskLevel::Low);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("failure_probability").is_some());
        assert!(json["component_health"].get("overall").is_some());
    }

    #[test]
    fn test_cycle_carries_trend_between_calls() {
        let config = EngineConfig::default();
        let samples = ScriptedSampleSource::default().flat_windows(&config.schedule.items, 30);
        let engine = MaintenanceEngine::new(config, ModelSet::default().with_classifier(Arc::new(Fixed(0.0))));

        let first = engine.run_cycle(&hot(), &samples, today());
        assert!(first.components.iter().all(|e| e.trend == Trend::Stable));

        // Same probability, factors drop to zero on every component that reads hot()
        let second = engine.run_cycle(&SensorReading::default(), &samples, today());
        let trend = |c: Component| second.components.get(c).map(|e| e.trend);
        for c in [Component::MainBearing, Component::Gearbox, Component::Generator, Component::ControlSystem] {
            assert_eq!(trend(c), Some(Trend::Declining), "{c}");
        }
        for c in [Component::PowerElectronics, Component::BladeSystem] {
            assert_eq!(trend(c), Some(Trend::Stable), "{c}");
        }
        assert_eq!(second.status.metrics.declining_components, 4);
        assert_eq!(second.maintenance.len(), 4);
        assert_ne!(second.status.status, OverallStatus::Unknown);
    }

    #[test]
    fn test_outlook_uses_classifier_probability() {
        let engine = MaintenanceEngine::new(EngineConfig::default(), ModelSet::default());
        let outlook = engine.outlook(&SensorReading::default());
        // default classifier probability 0.1, zero factors -> 0.05
        assert!(outlook
            .iter()
            .all(|(_, p)| p.status == crate::types::OutlookStatus::Normal && p.confidence == "5%"));
    }

    #[test]
    fn test_outlook_bands_follow_configured_thresholds() {
        let classifier = || ModelSet::default().with_classifier(Arc::new(Fixed(0.9)));
        let stock = MaintenanceEngine::new(EngineConfig::default(), classifier());

        let mut config = EngineConfig::default();
        config.estimator.medium_risk_threshold = 0.5;
        config.estimator.high_risk_threshold = 0.8;
        let tuned = MaintenanceEngine::new(config, classifier());

        // (0.9 + 0) / 2 = 0.45 on every target
        let calm = SensorReading::default();
        assert!(stock.outlook(&calm).iter().all(|(_, p)| p.status == crate::types::OutlookStatus::Warning));
        assert!(tuned.outlook(&calm).iter().all(|(_, p)| p.status == crate::types::OutlookStatus::Normal));
    }

    #[test]
    fn test_models_loaded_needs_both_models() {
        let engine = MaintenanceEngine::new(
            EngineConfig::default(),
            ModelSet::default().with_classifier(Arc::new(Fixed(0.2))),
        );
        assert!(!engine.models_loaded());
    }

    #[test]
    fn test_analytics_counts_schedule_and_failures() {
        let config = EngineConfig::default();
        let samples = ScriptedSampleSource::default().flat_windows(&config.schedule.items, 30);
        let engine = MaintenanceEngine::new(config, ModelSet::default().with_classifier(Arc::new(Fixed(1.0))));

        let summary = engine.analytics(&hot(), &samples, today());
        let schedule = engine.schedule(&samples, today());
        let count = |status: MaintenanceStatus| schedule.iter().filter(|m| m.status == status).count();

        assert_eq!(summary.scheduled_maintenance, count(MaintenanceStatus::Scheduled));
        assert_eq!(summary.overdue_maintenance, count(MaintenanceStatus::Due));
        assert_eq!(summary.predicted_failures, 1);
        assert_eq!(summary.risk_level, engine.estimate(&hot()).risk_level);
        assert!(engine.scorer().previous_scores().is_empty());
    }
}
