//! Per-component status outlook for the dashboard prediction cards.
//!
//! Each target blends the classifier probability with one normalized reading
//! factor: `p = (classifier_p + factor) / 2`, then buckets the result into
//! Normal / Warning / Critical.

use tracing::warn;

use crate::config::FactorSpec;
use crate::types::{
    ComponentOutlook, ComponentPrediction, OutlookStatus, OutlookTarget, RiskLevel, SensorField, SensorReading,
};

use super::scorer::normalize_factor;

/// Data-period labels, assigned by target position.
pub const DATA_PERIODS: [&str; 6] = [
    "30 days of logs",
    "6 weeks of data",
    "2 months of telemetry",
    "3 months of sensor data",
    "60 days of telemetry",
    "90 days of data",
];

/// Confidences reported by the canned outlook, by target position.
const FALLBACK_CONFIDENCE_PERCENT: [u32; 6] = [85, 88, 92, 87, 90, 89];

fn factor_spec(target: OutlookTarget) -> FactorSpec {
    match target {
        OutlookTarget::Gearbox => FactorSpec::new(SensorField::GearOilTemp, 100.0),
        OutlookTarget::Bearings => FactorSpec::new(SensorField::RotorRpm, 30.0),
        OutlookTarget::Generator => FactorSpec::new(SensorField::GeneratorTemp, 120.0),
        OutlookTarget::Rotors => FactorSpec::absolute(SensorField::BladePitch, 90.0),
        OutlookTarget::Blades => FactorSpec::new(SensorField::WindSpeed, 25.0),
        OutlookTarget::TemperatureSensors => FactorSpec::new(SensorField::NacelleTemp, 100.0),
    }
}

fn message(target: OutlookTarget, status: OutlookStatus) -> &'static str {
    use OutlookStatus::{Critical, Normal, Warning};
    use OutlookTarget as T;
    match (target, status) {
        (T::Gearbox, Critical) => "Oil pressure dropping rapidly. Immediate inspection needed.",
        (T::Gearbox, Warning) => "Oil temperature trending higher than normal. Schedule inspection soon.",
        (T::Gearbox, Normal) => "Gearbox operating within normal parameters.",
        (T::Bearings, Critical) => "Vibration intensity exceeding safety limits. Immediate shutdown required.",
        (T::Bearings, Warning) => "Abnormal vibration pattern detected. Schedule service soon.",
        (T::Bearings, Normal) => "Bearing vibration levels are stable and within range.",
        (T::Generator, Critical) => "Voltage fluctuations outside operational safety margin.",
        (T::Generator, Warning) => "Generator temperature approaching upper limits.",
        (T::Generator, Normal) => "Generator operating efficiently with stable output.",
        (T::Rotors, Critical) => "Rotor imbalance detected. Performance severely affected.",
        (T::Rotors, Warning) => "Rotor imbalance detected. Performance affected.",
        (T::Rotors, Normal) => "Rotor balance is optimal for current conditions.",
        (T::Blades, Critical) => "Blade damage detected. Immediate inspection required.",
        (T::Blades, Warning) => "Blade efficiency slightly reduced. Monitor closely.",
        (T::Blades, Normal) => "Blade aerodynamics are stable and efficient.",
        (T::TemperatureSensors, Critical) => "Multiple temperature sensors showing abnormal readings.",
        (T::TemperatureSensors, Warning) => "Some temperature sensors approaching limits.",
        (T::TemperatureSensors, Normal) => "Temperature sensors operating within calibration range.",
    }
}

/// Bands follow the estimator's risk ladder: HIGH is Critical, MEDIUM is Warning.
fn status_for(probability: f64, medium_above: f64, high_above: f64) -> OutlookStatus {
    match RiskLevel::from_probability(probability, medium_above, high_above) {
        RiskLevel::High => OutlookStatus::Critical,
        RiskLevel::Medium => OutlookStatus::Warning,
        RiskLevel::Low => OutlookStatus::Normal,
    }
}

/// Outlook for every target, in [`OutlookTarget::ALL`] order.
///
/// `medium_above` / `high_above` are the active estimator risk thresholds.
/// A non-finite classifier probability yields [`fallback_outlook`]; a
/// non-finite factor degrades only that target.
pub fn component_outlook(
    reading: &SensorReading,
    classifier_probability: f64,
    medium_above: f64,
    high_above: f64,
) -> ComponentOutlook {
    if !classifier_probability.is_finite() {
        warn!(classifier_probability, "Non-finite classifier probability, using canned outlook");
        return fallback_outlook();
    }
    let base = classifier_probability.clamp(0.0, 1.0);

    let mut outlook = ComponentOutlook::default();
    for (index, target) in OutlookTarget::ALL.into_iter().enumerate() {
        let factor = normalize_factor(&factor_spec(target), reading);
        let prediction = if factor.is_finite() {
            let p = ((base + factor) / 2.0).clamp(0.0, 1.0);
            let status = status_for(p, medium_above, high_above);
            ComponentPrediction {
                status,
                message: message(target, status).to_string(),
                confidence: format!("{}%", (p * 100.0).floor() as u32),
                based_on: DATA_PERIODS[index].to_string(),
            }
        } else {
            warn!(target = target.display_name(), "Non-finite outlook factor, reporting Normal");
            ComponentPrediction {
                status: OutlookStatus::Normal,
                message: format!("{} operating within normal parameters.", target.display_name()),
                confidence: format!("{}%", FALLBACK_CONFIDENCE_PERCENT[0]),
                based_on: DATA_PERIODS[0].to_string(),
            }
        };
        outlook.push(target, prediction);
    }
    outlook
}

/// The canned all-Normal outlook.
pub fn fallback_outlook() -> ComponentOutlook {
    let mut outlook = ComponentOutlook::default();
    for (index, target) in OutlookTarget::ALL.into_iter().enumerate() {
        outlook.push(
            target,
            ComponentPrediction {
                status: OutlookStatus::Normal,
                message: message(target, OutlookStatus::Normal).to_string(),
                confidence: format!("{}%", FALLBACK_CONFIDENCE_PERCENT[index]),
                based_on: DATA_PERIODS[index].to_string(),
            },
        );
    }
    outlook
}
