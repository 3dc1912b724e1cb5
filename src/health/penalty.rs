//! Deterministic penalty health model.
//!
//! Each component starts at 100 and loses a fixed deduction per threshold
//! breach. Serves the point-assessment path; the ML-blended scorer serves the
//! cycle path.

use crate::config::PenaltyConfig;
use crate::types::{PenaltyHealthReport, SensorReading};

const FULL_HEALTH: f64 = 100.0;

/// Score gearbox, generator, blades and nacelle, plus their mean.
pub fn score_penalties(reading: &SensorReading, config: &PenaltyConfig) -> PenaltyHealthReport {
    let mut gearbox = FULL_HEALTH;
    if reading.gear_oil_temp > config.gear_oil_temp_limit_c {
        gearbox -= config.gear_oil_temp_penalty;
    }
    if reading.gear_oil_pressure < config.oil_pressure_min_bar {
        gearbox -= config.oil_pressure_penalty;
    }

    let mut generator = FULL_HEALTH;
    if reading.generator_temp > config.generator_temp_limit_c {
        generator -= config.generator_temp_penalty;
    }

    let mut blades = FULL_HEALTH;
    if reading.blade_pitch.abs() > config.blade_pitch_limit_deg {
        blades -= config.blade_pitch_penalty;
    }

    let mut nacelle = FULL_HEALTH;
    if reading.nacelle_temp > config.nacelle_temp_limit_c {
        nacelle -= config.nacelle_temp_penalty;
    }

    let (gearbox, generator, blades, nacelle) =
        (clamp(gearbox), clamp(generator), clamp(blades), clamp(nacelle));

    PenaltyHealthReport {
        gearbox,
        generator,
        blades,
        nacelle,
        overall: (gearbox + generator + blades + nacelle) / 4.0,
    }
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, FULL_HEALTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> SensorReading {
        SensorReading {
            gear_oil_temp: 65.0,
            gear_oil_pressure: 2.5,
            generator_temp: 75.0,
            blade_pitch: 5.0,
            nacelle_temp: 55.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_nominal_reading_is_fully_healthy() {
        let r = score_penalties(&nominal(), &PenaltyConfig::default());
        assert_eq!(r.overall, 100.0);
        assert!(r.component_scores().iter().all(|(_, s)| *s == 100.0));
    }

    #[test]
    fn test_every_breach_deducts() {
        let reading = SensorReading {
            gear_oil_temp: 85.0,
            gear_oil_pressure: 1.8,
            generator_temp: 90.0,
            blade_pitch: -95.0,
            nacelle_temp: 75.0,
            ..Default::default()
        };
        let r = score_penalties(&reading, &PenaltyConfig::default());
        assert_eq!(r.gearbox, 65.0);
        assert_eq!(r.generator, 75.0);
        assert_eq!(r.blades, 90.0);
        assert_eq!(r.nacelle, 85.0);
        assert_eq!(r.overall, 78.75);
    }

    #[test]
    fn test_limits_are_strict() {
        let reading = SensorReading {
            gear_oil_temp: 80.0,
            gear_oil_pressure: 2.0,
            generator_temp: 85.0,
            blade_pitch: 90.0,
            nacelle_temp: 70.0,
            ..Default::default()
        };
        assert_eq!(score_penalties(&reading, &PenaltyConfig::default()).overall, 100.0);
    }

    #[test]
    fn test_oversized_penalty_clamps_at_zero() {
        let config = PenaltyConfig {
            generator_temp_penalty: 250.0,
            ..Default::default()
        };
        let reading = SensorReading { generator_temp: 120.0, ..nominal() };
        assert_eq!(score_penalties(&reading, &config).generator, 0.0);
    }
}
