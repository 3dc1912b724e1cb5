//! Ensemble failure estimation.

use thiserror::Error;
use tracing::{debug, warn};

use super::capability::{ModelError, ModelSet};
use crate::config::EstimatorConfig;
use crate::types::{FailureEstimate, ModelDetails, RiskLevel, SensorReading};

pub const ACTION_IMMEDIATE_INSPECTION: &str = "Schedule immediate inspection";
pub const ACTION_CHECK_GEARBOX_OIL: &str = "Check gearbox oil temperature";
pub const ACTION_MONITOR_NACELLE: &str = "Monitor nacelle temperature";
pub const ACTION_CHECK_ROTOR_SPEED: &str = "Check rotor speed parameters";
pub const ACTION_CONTINUE: &str = "Continue normal operations";

/// Reasons an estimate degrades to the fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Empty feature vector")]
    EmptyFeatures,

    #[error("Non-finite feature value at index {0}")]
    NonFiniteFeature(usize),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Combines classifier and sequence-model probabilities into one estimate.
///
/// Never fails: missing models are replaced by configured default
/// probabilities, and any error while scoring yields the fallback estimate.
#[derive(Debug, Clone)]
pub struct FailureEstimator {
    config: EstimatorConfig,
    models: ModelSet,
}

impl FailureEstimator {
    pub fn new(config: EstimatorConfig, models: ModelSet) -> Self {
        Self { config, models }
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Estimate failure risk for one reading.
    ///
    /// `features` is the adapted classifier input for `reading`; the reading
    /// itself drives the recommended actions.
    pub fn estimate(&self, reading: &SensorReading, features: &[f64]) -> FailureEstimate {
        match self.try_estimate(reading, features) {
            Ok(estimate) => {
                debug!(
                    probability = estimate.failure_probability,
                    risk = %estimate.risk_level,
                    actions = estimate.recommended_actions.len(),
                    "Failure estimate computed"
                );
                estimate
            }
            Err(e) => {
                warn!(error = %e, "Failure estimation failed, using fallback estimate");
                self.fallback()
            }
        }
    }

    /// The canned estimate returned whenever scoring fails.
    pub fn fallback(&self) -> FailureEstimate {
        let p = self.config.fallback_probability;
        FailureEstimate {
            failure_probability: p,
            failure_prediction: false,
            confidence: self.config.fallback_confidence,
            risk_level: RiskLevel::Low,
            recommended_actions: vec![ACTION_CONTINUE.to_string()],
            model_details: ModelDetails {
                classifier_probability: p,
                sequence_probability: p,
                ensemble_probability: p,
            },
        }
    }

    /// Map a probability onto the configured risk ladder.
    pub fn risk_level(&self, probability: f64) -> RiskLevel {
        RiskLevel::from_probability(
            probability,
            self.config.medium_risk_threshold,
            self.config.high_risk_threshold,
        )
    }

    fn try_estimate(
        &self,
        reading: &SensorReading,
        features: &[f64],
    ) -> Result<FailureEstimate, EstimatorError> {
        if features.is_empty() {
            return Err(EstimatorError::EmptyFeatures);
        }
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(EstimatorError::NonFiniteFeature(i));
        }

        let scaled = match &self.models.scaler {
            Some(scaler) => scaler.transform(features)?,
            None => features.to_vec(),
        };

        let classifier_probability = match &self.models.classifier {
            Some(classifier) => {
                let [_, p_fail] = classifier.predict_proba(&scaled)?;
                clamp_probability(p_fail)?
            }
            None => self.config.default_classifier_probability,
        };

        let sequence_probability = match &self.models.sequence {
            Some(sequence) => clamp_probability(sequence.failure_probability(&scaled)?)?,
            None => self.config.default_sequence_probability,
        };

        let ensemble_probability = self.ensemble(classifier_probability, sequence_probability);

        Ok(FailureEstimate {
            failure_probability: ensemble_probability,
            failure_prediction: ensemble_probability > self.config.failure_threshold,
            confidence: classifier_probability.max(sequence_probability),
            risk_level: self.risk_level(ensemble_probability),
            recommended_actions: self.recommended_actions(reading, ensemble_probability),
            model_details: ModelDetails {
                classifier_probability,
                sequence_probability,
                ensemble_probability,
            },
        })
    }

    /// Weighted mean of the two probabilities (equal weights by default).
    fn ensemble(&self, classifier: f64, sequence: f64) -> f64 {
        let wc = self.config.classifier_weight;
        let ws = self.config.sequence_weight;
        let total = wc + ws;
        if total <= 0.0 {
            return ((classifier + sequence) / 2.0).clamp(0.0, 1.0);
        }
        ((wc * classifier + ws * sequence) / total).clamp(0.0, 1.0)
    }

    /// Ordered action list. Checks run in a fixed order; an empty result
    /// becomes "Continue normal operations".
    fn recommended_actions(&self, reading: &SensorReading, probability: f64) -> Vec<String> {
        let c = &self.config;
        let mut actions = Vec::new();
        if probability > c.failure_threshold {
            actions.push(ACTION_IMMEDIATE_INSPECTION.to_string());
        }
        if reading.gear_oil_temp > c.gear_oil_temp_action_c {
            actions.push(ACTION_CHECK_GEARBOX_OIL.to_string());
        }
        if reading.nacelle_temp > c.nacelle_temp_action_c {
            actions.push(ACTION_MONITOR_NACELLE.to_string());
        }
        if reading.rotor_rpm > c.rotor_rpm_action {
            actions.push(ACTION_CHECK_ROTOR_SPEED.to_string());
        }
        if actions.is_empty() {
            actions.push(ACTION_CONTINUE.to_string());
        }
        actions
    }
}

/// Clamp a model probability into [0, 1]; NaN is an error.
fn clamp_probability(p: f64) -> Result<f64, ModelError> {
    if p.is_nan() {
        return Err(ModelError::InvalidProbability(p));
    }
    Ok(p.clamp(0.0, 1.0))
}
