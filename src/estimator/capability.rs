//! Injected model capabilities.
//!
//! The engine never trains or loads models itself. Whatever sits behind these
//! traits (a JSON-backed logistic model, a remote scorer, a test double) is
//! supplied by the caller at construction time.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised by model capabilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Feature shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Non-finite feature value at index {0}")]
    NonFiniteFeature(usize),

    #[error("Model produced an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("Model error: {0}")]
    Other(String),
}

/// Binary failure classifier (`predict_proba`-style).
pub trait FailureClassifier: Send + Sync {
    /// Class probabilities `[p_ok, p_fail]` for one feature vector.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;

    /// Feature identifiers the classifier was trained on, in order.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Sequence model producing a failure probability.
pub trait SequenceModel: Send + Sync {
    fn failure_probability(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// Feature normalizer applied before both models.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// The optional capabilities available to one engine instance.
///
/// Any member may be absent; the estimator substitutes configured defaults.
#[derive(Clone, Default)]
pub struct ModelSet {
    pub classifier: Option<Arc<dyn FailureClassifier>>,
    pub sequence: Option<Arc<dyn SequenceModel>>,
    pub scaler: Option<Arc<dyn FeatureScaler>>,
}

impl ModelSet {
    pub fn with_classifier(mut self, classifier: Arc<dyn FailureClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_sequence(mut self, sequence: Arc<dyn SequenceModel>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_scaler(mut self, scaler: Arc<dyn FeatureScaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /// True when both probability-producing models are present.
    pub fn all_models_loaded(&self) -> bool {
        self.classifier.is_some() && self.sequence.is_some()
    }

    /// Expected feature identifiers published by the classifier.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.classifier.as_deref().and_then(|c| c.feature_names())
    }
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("classifier", &self.classifier.is_some())
            .field("sequence", &self.sequence.is_some())
            .field("scaler", &self.scaler.is_some())
            .finish()
    }
}
