//! Feature Adapter
//!
//! Maps a [`SensorReading`] onto the fixed-length vector a failure classifier
//! expects. The classifier publishes its expected feature identifiers (SCADA
//! column names such as `T01_WindSpeed_avg`); each identifier is matched by
//! keyword against a small vocabulary and filled from the matching reading
//! field. Identifiers matching no keyword are filled with `0.0`.
//!
//! With no expected-feature list the adapter falls back to a fixed 10-field
//! subset of the reading. Adaptation is total over any reading.

use crate::types::{SensorField, SensorReading};

/// Value used for identifiers that match no keyword.
pub const MISSING_FEATURE_VALUE: f64 = 0.0;

/// Keyword vocabulary, checked in order; the first keyword contained in an
/// identifier wins.
const KEYWORDS: [(&str, SensorField); 5] = [
    ("WindSpeed", SensorField::WindSpeed),
    ("Power", SensorField::PowerOutput),
    ("RPM", SensorField::RotorRpm),
    ("Temp", SensorField::NacelleTemp),
    ("Voltage", SensorField::VoltageL1),
];

/// Reading fields used when the model publishes no feature list.
pub const FALLBACK_FIELDS: [SensorField; 10] = [
    SensorField::WindSpeed,
    SensorField::PowerOutput,
    SensorField::RotorRpm,
    SensorField::NacelleTemp,
    SensorField::GearOilTemp,
    SensorField::GeneratorTemp,
    SensorField::BladePitch,
    SensorField::YawAngle,
    SensorField::VoltageL1,
    SensorField::VoltageL2,
];

/// Builds classifier input vectors from sensor readings.
#[derive(Debug, Clone)]
pub struct FeatureAdapter {
    max_features: usize,
}

impl Default for FeatureAdapter {
    fn default() -> Self {
        Self::new(crate::config::defaults::MAX_MODEL_FEATURES)
    }
}

impl FeatureAdapter {
    /// `max_features` caps how many expected identifiers are consumed.
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Resolve the reading field an identifier maps to, if any.
    pub fn match_identifier(identifier: &str) -> Option<SensorField> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| identifier.contains(keyword))
            .map(|(_, field)| *field)
    }

    /// Produce the feature vector for `reading`.
    ///
    /// `expected` is the classifier's ordered identifier list; `None` or an
    /// empty list selects [`FALLBACK_FIELDS`].
    pub fn adapt(&self, reading: &SensorReading, expected: Option<&[String]>) -> Vec<f64> {
        match expected {
            Some(names) if !names.is_empty() => names
                .iter()
                .take(self.max_features)
                .map(|name| {
                    Self::match_identifier(name)
                        .map_or(MISSING_FEATURE_VALUE, |field| reading.get(field))
                })
                .collect(),
            _ => FALLBACK_FIELDS.iter().map(|f| reading.get(*f)).collect(),
        }
    }
}
