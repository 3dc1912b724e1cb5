//! ML-blended component health scorer.
//!
//! ```text
//! ml_term     = (1 - p) * ml_weight          (20 by default)
//! factor_term = mean(factors) * factor_weight (10 by default)
//! score       = clamp(base + ml_term + factor_term, 0, 100)
//! ```
//!
//! Trend is the direction of change against the previous cycle's score for the
//! same component. The previous-score table is owned by the scorer and guarded
//! by one mutex held for the whole cycle, so concurrent cycles never see a
//! partially replaced table.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::config::{ComponentSpec, FactorSpec, HealthConfig};
use crate::types::{Component, ComponentHealth, ComponentHealthSet, SensorReading, Trend};

// ============================================================================
// Factors
// ============================================================================

/// Normalized input factors per component (each roughly in [0, 1]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentFactors {
    values: BTreeMap<Component, Vec<f64>>,
}

impl ComponentFactors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: Component, factors: Vec<f64>) {
        self.values.insert(component, factors);
    }

    pub fn with(mut self, component: Component, factors: Vec<f64>) -> Self {
        self.insert(component, factors);
        self
    }

    /// Factors for `component`; empty when none were supplied.
    pub fn get(&self, component: Component) -> &[f64] {
        self.values.get(&component).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Raw reading value divided by its nominal maximum.
pub fn normalize_factor(spec: &FactorSpec, reading: &SensorReading) -> f64 {
    let raw = spec.field.value(reading);
    let raw = if spec.absolute { raw.abs() } else { raw };
    raw / spec.nominal_max
}

// ============================================================================
// Scorer
// ============================================================================

#[derive(Debug)]
pub struct ComponentHealthScorer {
    config: HealthConfig,
    previous: Mutex<HashMap<Component, u8>>,
}

impl ComponentHealthScorer {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            previous: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Derive the factor table for every configured component from a reading.
    pub fn factors_from_reading(&self, reading: &SensorReading) -> ComponentFactors {
        self.config
            .components
            .iter()
            .map(|spec| {
                let factors = spec.factors.iter().map(|f| normalize_factor(f, reading)).collect();
                (spec.component, factors)
            })
            .fold(ComponentFactors::new(), |acc, (c, f)| acc.with(c, f))
    }

    /// Run one scoring cycle.
    ///
    /// Entries follow the configured component order. The previous-score
    /// table is replaced with this cycle's scores before the lock is released.
    pub fn score(&self, factors: &ComponentFactors, failure_probability: f64) -> ComponentHealthSet {
        let p = sanitize_probability(failure_probability);
        let mut previous = self.lock_previous();

        let set: ComponentHealthSet = self
            .config
            .components
            .iter()
            .map(|spec| {
                let score = self.component_score(spec, factors.get(spec.component), p);
                let prev = previous.get(&spec.component).copied().unwrap_or(score);
                let trend = Trend::from_delta(
                    f64::from(score) - f64::from(prev),
                    self.config.trend_dead_band,
                );
                ComponentHealth {
                    component: spec.component,
                    score,
                    trend,
                }
            })
            .collect();

        *previous = set.iter().map(|e| (e.component, e.score)).collect();
        drop(previous);

        debug!(
            components = set.len(),
            average = set.average_score().unwrap_or(0.0),
            probability = p,
            "Health cycle scored"
        );
        set
    }

    /// Snapshot of the previous-score table.
    pub fn previous_scores(&self) -> HashMap<Component, u8> {
        self.lock_previous().clone()
    }

    /// Forget all previous scores; the next cycle reports every trend as stable.
    pub fn reset(&self) {
        self.lock_previous().clear();
    }

    fn component_score(&self, spec: &ComponentSpec, factors: &[f64], p: f64) -> u8 {
        let factor_mean = if factors.is_empty() {
            0.0
        } else {
            factors.iter().sum::<f64>() / factors.len() as f64
        };
        let ml_term = (1.0 - p) * self.config.ml_weight;
        let factor_term = factor_mean * self.config.factor_weight;
        let raw = spec.base_score + ml_term + factor_term;

        if raw.is_nan() {
            warn!(component = %spec.component, "Health score is NaN, reporting 0");
            return 0;
        }
        raw.clamp(0.0, 100.0).round() as u8
    }

    fn lock_previous(&self) -> MutexGuard<'_, HashMap<Component, u8>> {
        self.previous.lock().unwrap_or_else(|e| {
            warn!("Mutex poisoned on previous health scores, recovering");
            e.into_inner()
        })
    }
}

/// Clamp into [0, 1]; NaN is treated as certain failure.
fn sanitize_probability(p: f64) -> f64 {
    if p.is_nan() {
        warn!("Failure probability is NaN, scoring as 1.0");
        return 1.0;
    }
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorField;
    use std::sync::Arc;
    use std::thread;

    fn single(component: Component, base_score: f64) -> HealthConfig {
        HealthConfig {
            components: vec![ComponentSpec {
                component,
                base_score,
                factors: vec![FactorSpec::new(SensorField::GearOilTemp, 100.0)],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_formula_matches_blend() {
        let scorer = ComponentHealthScorer::new(single(Component::Gearbox, 65.0));
        let factors = ComponentFactors::new().with(Component::Gearbox, vec![0.6, 0.8]);
        let set = scorer.score(&factors, 0.25);
        // 65 + 0.75 * 20 + 0.7 * 10 = 87
        assert_eq!(set.get(Component::Gearbox).unwrap().score, 87);
    }

    #[test]
    fn test_scores_clamped_for_pathological_inputs() {
        let scorer = ComponentHealthScorer::new(HealthConfig::default());
        for (factor, p) in [(1e9, 0.0), (-1e9, 1.0), (f64::INFINITY, 0.5), (-5.0, -3.0), (0.5, 7.0)] {
            let factors = Component::ALL
                .iter()
                .fold(ComponentFactors::new(), |acc, c| acc.with(*c, vec![factor]));
            for entry in &scorer.score(&factors, p) {
                assert!(entry.score <= 100, "{factor} {p} -> {}", entry.score);
            }
        }
        let high = scorer.score(&ComponentFactors::new().with(Component::Gearbox, vec![1e9]), 0.0);
        assert_eq!(high.get(Component::Gearbox).unwrap().score, 100);
        let low = scorer.score(&ComponentFactors::new().with(Component::Gearbox, vec![-1e9]), 1.0);
        assert_eq!(low.get(Component::Gearbox).unwrap().score, 0);
    }

    #[test]
    fn test_nan_inputs_do_not_panic() {
        let scorer = ComponentHealthScorer::new(single(Component::Generator, 68.0));
        let set = scorer.score(&ComponentFactors::new().with(Component::Generator, vec![f64::NAN]), 0.1);
        assert_eq!(set.get(Component::Generator).unwrap().score, 0);
        let set = scorer.score(&ComponentFactors::new(), f64::NAN);
        // NaN probability scores as certain failure: 68 + 0 + 0
        assert_eq!(set.get(Component::Generator).unwrap().score, 68);
    }

    #[test]
    fn test_first_cycle_is_stable_then_tracks_direction() {
        let scorer = ComponentHealthScorer::new(single(Component::Gearbox, 65.0));
        let f = ComponentFactors::new().with(Component::Gearbox, vec![0.5]);

        let first = scorer.score(&f, 0.5);
        assert_eq!(first.get(Component::Gearbox).unwrap().trend, Trend::Stable);

        let worse = scorer.score(&f, 0.9);
        assert_eq!(worse.get(Component::Gearbox).unwrap().trend, Trend::Declining);

        let better = scorer.score(&f, 0.1);
        assert_eq!(better.get(Component::Gearbox).unwrap().trend, Trend::Improving);
    }

    #[test]
    fn test_unchanged_score_is_idempotently_stable() {
        let scorer = ComponentHealthScorer::new(HealthConfig::default());
        let reading = SensorReading {
            wind_speed: 12.0,
            rotor_rpm: 15.0,
            gear_oil_temp: 70.0,
            ..Default::default()
        };
        let factors = scorer.factors_from_reading(&reading);
        scorer.score(&factors, 0.3);
        let again = scorer.score(&factors, 0.3);
        assert!(again.iter().all(|e| e.trend == Trend::Stable));
    }

    #[test]
    fn test_sub_point_change_is_stable() {
        let scorer = ComponentHealthScorer::new(single(Component::Gearbox, 65.0));
        let f = ComponentFactors::new();
        scorer.score(&f, 0.50);
        // 0.02 * 20 = 0.4 points, rounds to the same integer score
        let next = scorer.score(&f, 0.48);
        assert_eq!(next.get(Component::Gearbox).unwrap().trend, Trend::Stable);
    }

    #[test]
    fn test_previous_table_replaced_and_reset() {
        let scorer = ComponentHealthScorer::new(HealthConfig::default());
        assert!(scorer.previous_scores().is_empty());

        let set = scorer.score(&ComponentFactors::new(), 0.2);
        let prev = scorer.previous_scores();
        assert_eq!(prev.len(), Component::ALL.len());
        for entry in &set {
            assert_eq!(prev.get(&entry.component), Some(&entry.score));
        }

        scorer.reset();
        assert!(scorer.previous_scores().is_empty());
    }

    #[test]
    fn test_entries_follow_configured_order() {
        let scorer = ComponentHealthScorer::new(HealthConfig::default());
        let order: Vec<Component> = scorer.score(&ComponentFactors::new(), 0.1).iter().map(|e| e.component).collect();
        assert_eq!(order, Component::ALL.to_vec());
    }

    #[test]
    fn test_absolute_factor_uses_magnitude() {
        let spec = FactorSpec::absolute(SensorField::BladePitch, 90.0);
        let reading = SensorReading { blade_pitch: -45.0, ..Default::default() };
        assert_eq!(normalize_factor(&spec, &reading), 0.5);
    }

    #[test]
    fn test_concurrent_cycles_see_whole_previous_table() {
        let scorer = Arc::new(ComponentHealthScorer::new(HealthConfig::default()));
        let factors = Arc::new(scorer.factors_from_reading(&SensorReading::default()));

        // p=0 and p=1 move every score by 20 points, so a cycle that read a
        // half-replaced table would mix trends
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let scorer = Arc::clone(&scorer);
                let factors = Arc::clone(&factors);
                thread::spawn(move || {
                    for i in 0..500 {
                        let p = if (t + i) % 2 == 0 { 0.0 } else { 1.0 };
                        let set = scorer.score(&factors, p);
                        let first = set.iter().next().map(|e| e.trend);
                        assert!(set.iter().all(|e| Some(e.trend) == first), "mixed trends: {set:?}");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(scorer.previous_scores().len(), Component::ALL.len());
    }
}
