//! Model Bundle
//!
//! Concrete, JSON-backed implementations of the estimator capabilities and the
//! loader for an on-disk bundle directory:
//!
//! ```text
//! <model-dir>/
//!   classifier.json     {"weights": [...], "bias": 0.0}
//!   scaler.json         {"mean": [...], "scale": [...]}
//!   feature_names.json  ["T01_WindSpeed_avg", ...]
//! ```
//!
//! Every file is optional. A missing or unreadable file leaves that capability
//! absent and the estimator serves fallback predictions for it.

mod logistic;
mod scaler;

pub use logistic::LogisticClassifier;
pub use scaler::StandardScaler;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::estimator::{ModelError, ModelSet};

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Invalid model in {0}: {1}")]
    Invalid(PathBuf, #[source] ModelError),
}

/// Load whatever capabilities `dir` provides.
///
/// Never fails: each file is loaded independently and problems are logged.
pub fn load_bundle(dir: &Path) -> ModelSet {
    let mut models = ModelSet::default();

    let feature_names: Option<Vec<String>> = load_optional(&dir.join(FEATURE_NAMES_FILE));

    if let Some(classifier) = load_optional::<LogisticClassifier>(&dir.join(CLASSIFIER_FILE))
        .and_then(|c| validated(c, &dir.join(CLASSIFIER_FILE), LogisticClassifier::validate))
    {
        let classifier = match feature_names {
            Some(names) if classifier.feature_names.is_empty() => classifier.with_feature_names(names),
            _ => classifier,
        };
        info!(
            inputs = classifier.weights.len(),
            named_features = classifier.feature_names.len(),
            "Failure classifier loaded"
        );
        models = models.with_classifier(Arc::new(classifier));
    }

    if let Some(scaler) = load_optional::<StandardScaler>(&dir.join(SCALER_FILE))
        .and_then(|s| validated(s, &dir.join(SCALER_FILE), StandardScaler::validate))
    {
        info!(columns = scaler.mean.len(), "Feature scaler loaded");
        models = models.with_scaler(Arc::new(scaler));
    }

    if !models.all_models_loaded() {
        warn!(dir = %dir.display(), ?models, "Model bundle incomplete, serving fallback predictions");
    }
    models
}

/// Read and parse one JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, BundleError> {
    let json = std::fs::read_to_string(path).map_err(|e| BundleError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&json).map_err(|e| BundleError::Json(path.to_path_buf(), e))
}

fn load_optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        debug!(path = %path.display(), "Model file not present");
        return None;
    }
    match load_json(path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable model file");
            None
        }
    }
}

fn validated<T>(value: T, path: &Path, check: fn(&T) -> Result<(), ModelError>) -> Option<T> {
    match check(&value) {
        Ok(()) => Some(value),
        Err(e) => {
            warn!(error = %BundleError::Invalid(path.to_path_buf(), e), "Ignoring invalid model file");
            None
        }
    }
}
