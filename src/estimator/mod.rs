//! Failure Estimator
//!
//! Turns an adapted feature vector into a [`crate::types::FailureEstimate`]:
//! - `capability`: injected classifier / sequence-model / scaler traits
//! - `failure`: ensemble probability, risk ladder, recommended actions
//!
//! The estimator is total. Missing capabilities fall back to configured
//! default probabilities; malformed input or a model error yields the canned
//! fallback estimate (probability 0.1, LOW, "Continue normal operations").

mod capability;
mod failure;

pub use capability::{FailureClassifier, FeatureScaler, ModelError, ModelSet, SequenceModel};
pub use failure::{
    EstimatorError, FailureEstimator, ACTION_CHECK_GEARBOX_OIL, ACTION_CHECK_ROTOR_SPEED,
    ACTION_CONTINUE, ACTION_IMMEDIATE_INSPECTION, ACTION_MONITOR_NACELLE,
};
