//! Logistic-regression failure classifier restored from JSON.

use serde::{Deserialize, Serialize};

use crate::estimator::{FailureClassifier, ModelError};

/// `P(failure) = sigmoid(bias + weights · x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Training column names, in input order
    #[serde(default)]
    pub feature_names: Vec<String>,
}

impl LogisticClassifier {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            feature_names: Vec::new(),
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = names;
        self
    }

    /// Reject coefficient sets that can never produce a probability.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.weights.is_empty() {
            return Err(ModelError::Other("classifier has no weights".to_string()));
        }
        if let Some(i) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(ModelError::Other(format!("classifier weight {i} is not finite")));
        }
        if !self.bias.is_finite() {
            return Err(ModelError::Other("classifier bias is not finite".to_string()));
        }
        Ok(())
    }
}

impl FailureClassifier for LogisticClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature(i));
        }
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p_fail = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - p_fail, p_fail])
    }

    fn feature_names(&self) -> Option<&[String]> {
        if self.feature_names.is_empty() {
            None
        } else {
            Some(&self.feature_names)
        }
    }
}
