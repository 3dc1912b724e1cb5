//! Failure Estimator output types: FailureEstimate, RiskLevel, ModelDetails

use serde::{Deserialize, Serialize};

/// Discrete risk bucket derived from the ensemble failure probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Step function over the probability.
    ///
    /// Comparisons are strict: a probability exactly on a threshold stays in
    /// the lower bracket (`0.4` is LOW, `0.7` is MEDIUM with the defaults).
    pub fn from_probability(probability: f64, medium_above: f64, high_above: f64) -> Self {
        if probability > high_above {
            Self::High
        } else if probability > medium_above {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Per-model probabilities behind an ensemble estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Classifier P(failure)
    pub classifier_probability: f64,
    /// Sequence-model P(failure)
    pub sequence_probability: f64,
    /// Weighted mean of the two
    pub ensemble_probability: f64,
}

/// Result of one failure estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEstimate {
    /// Ensemble probability of failure, in [0, 1]
    pub failure_probability: f64,
    /// `failure_probability` above the failure threshold
    pub failure_prediction: bool,
    /// Highest constituent probability
    pub confidence: f64,
    pub risk_level: RiskLevel,
    /// Ordered, never empty
    pub recommended_actions: Vec<String>,
    pub model_details: ModelDetails,
}
