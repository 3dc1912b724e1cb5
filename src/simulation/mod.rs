//! Sample Inputs
//!
//! The engine is deterministic and never draws random numbers itself. Demo
//! readings and the short trend windows behind the maintenance schedule come
//! from a [`SampleSource`] supplied by the caller:
//!
//! - [`RandomSampleSource`]: uniform readings over plausible operating ranges
//!   and random-walk trend windows (seedable for reproducible runs)
//! - [`ScriptedSampleSource`]: replays fixed readings and windows (tests, CLI)

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use thiserror::Error;
use tracing::warn;

use crate::config::MaintenanceItemSpec;
use crate::types::SensorReading;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("No trend window available for {0}")]
    Unavailable(String),

    #[error("Invalid sampling distribution: {0}")]
    Distribution(String),
}

/// Supplies readings and trend windows to the engine.
pub trait SampleSource: Send + Sync {
    /// One sensor snapshot.
    fn reading(&self) -> SensorReading;

    /// `item.factor_count` series of `window_len` samples each, oldest first.
    fn trend_window(&self, item: &MaintenanceItemSpec, window_len: usize) -> Result<Vec<Vec<f64>>, SampleError>;
}

// ============================================================================
// Random
// ============================================================================

/// Standard deviation of one random-walk step (normalized factor units)
const TREND_STEP_SIGMA: f64 = 0.05;

pub struct RandomSampleSource {
    rng: Mutex<StdRng>,
}

impl RandomSampleSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| {
            warn!("Mutex poisoned on sample RNG, recovering");
            e.into_inner()
        });
        f(&mut rng)
    }
}

impl SampleSource for RandomSampleSource {
    fn reading(&self) -> SensorReading {
        self.with_rng(|rng| SensorReading {
            wind_speed: rng.gen_range(5.0..25.0),
            power_output: rng.gen_range(1000.0..3000.0),
            rotor_rpm: rng.gen_range(10.0..30.0),
            nacelle_temp: rng.gen_range(50.0..90.0),
            gear_oil_temp: rng.gen_range(60.0..100.0),
            generator_temp: rng.gen_range(70.0..110.0),
            blade_pitch: rng.gen_range(-5.0..90.0),
            yaw_angle: rng.gen_range(0.0..360.0),
            voltage_l1: rng.gen_range(350.0..400.0),
            voltage_l2: rng.gen_range(350.0..400.0),
            voltage_l3: rng.gen_range(350.0..400.0),
            current_l1: rng.gen_range(100.0..200.0),
            current_l2: rng.gen_range(100.0..200.0),
            current_l3: rng.gen_range(100.0..200.0),
            gear_oil_pressure: rng.gen_range(1.5..3.0),
            ambient_temp: rng.gen_range(10.0..35.0),
            humidity: rng.gen_range(30.0..80.0),
            wind_direction: rng.gen_range(0.0..360.0),
            timestamp: None,
        })
    }

    fn trend_window(&self, item: &MaintenanceItemSpec, window_len: usize) -> Result<Vec<Vec<f64>>, SampleError> {
        let step = Normal::new(0.0, TREND_STEP_SIGMA).map_err(|e| SampleError::Distribution(e.to_string()))?;
        Ok(self.with_rng(|rng| {
            (0..item.factor_count)
                .map(|_| {
                    let mut value: f64 = rng.gen_range(0.2..0.8);
                    (0..window_len)
                        .map(|_| {
                            let current = value;
                            value += step.sample(rng);
                            current
                        })
                        .collect::<Vec<f64>>()
                })
                .collect()
        }))
    }
}

// ============================================================================
// Scripted
// ============================================================================

/// Replays a fixed reading list (cycling) and fixed trend windows per item.
#[derive(Debug, Default)]
pub struct ScriptedSampleSource {
    readings: Vec<SensorReading>,
    windows: Vec<(String, Vec<Vec<f64>>)>,
    cursor: Mutex<usize>,
}

impl ScriptedSampleSource {
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self {
            readings,
            ..Default::default()
        }
    }

    /// Script the trend window returned for `component`.
    pub fn with_window(mut self, component: impl Into<String>, series: Vec<Vec<f64>>) -> Self {
        self.windows.push((component.into(), series));
        self
    }

    /// Flat series (no trend) for every item, giving each its baseline RUL.
    pub fn flat_windows(mut self, items: &[MaintenanceItemSpec], window_len: usize) -> Self {
        for item in items {
            self.windows
                .push((item.component.clone(), vec![vec![0.5; window_len]; item.factor_count]));
        }
        self
    }
}

impl SampleSource for ScriptedSampleSource {
    fn reading(&self) -> SensorReading {
        if self.readings.is_empty() {
            return SensorReading::default();
        }
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let reading = self.readings[*cursor % self.readings.len()].clone();
        *cursor += 1;
        reading
    }

    fn trend_window(&self, item: &MaintenanceItemSpec, _window_len: usize) -> Result<Vec<Vec<f64>>, SampleError> {
        self.windows
            .iter()
            .find(|(component, _)| *component == item.component)
            .map(|(_, series)| series.clone())
            .ok_or_else(|| SampleError::Unavailable(item.component.clone()))
    }
}
