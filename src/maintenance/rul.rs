//! Health-based remaining useful life.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::RulConfig;

/// `rul = floor(baseline_hours * health / 100)` for every scored component
/// with a configured baseline. Components without a baseline (e.g. the
/// `overall` figure) are skipped.
///
/// Health is clamped to [0, 100]. A non-finite health value replaces the
/// whole map with [`fallback_rul`].
pub fn estimate_rul<'a, I>(scores: I, config: &RulConfig) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut estimates = BTreeMap::new();
    for (component, health) in scores {
        let Some(&baseline) = config.baseline_hours.get(component) else {
            continue;
        };
        if !health.is_finite() {
            warn!(component, health, "Non-finite health score, using fallback RUL");
            return fallback_rul(config);
        }
        estimates.insert(component.to_string(), scale(baseline, health));
    }
    estimates
}

/// Every baseline scaled by the configured fallback health.
pub fn fallback_rul(config: &RulConfig) -> BTreeMap<String, u32> {
    config
        .baseline_hours
        .iter()
        .map(|(component, baseline)| (component.clone(), scale(*baseline, config.fallback_health_percent)))
        .collect()
}

fn scale(baseline_hours: u32, health: f64) -> u32 {
    (f64::from(baseline_hours) * health.clamp(0.0, 100.0) / 100.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_baseline_by_health() {
        let rul = estimate_rul(
            [("gearbox", 65.0), ("generator", 100.0), ("blades", 90.0), ("nacelle", 85.0), ("overall", 85.0)],
            &RulConfig::default(),
        );
        assert_eq!(rul.get("gearbox"), Some(&5694));
        assert_eq!(rul.get("generator"), Some(&17_520));
        assert_eq!(rul.get("blades"), Some(&23_652));
        assert_eq!(rul.get("nacelle"), Some(&11_169));
        assert!(!rul.contains_key("overall"));
    }

    #[test]
    fn test_monotonic_in_health() {
        let config = RulConfig::default();
        let mut last = 0;
        for h in 0..=100 {
            let rul = estimate_rul([("gearbox", f64::from(h))], &config)["gearbox"];
            assert!(rul >= last, "health {h}: {rul} < {last}");
            last = rul;
        }
        assert_eq!(last, 8760);
    }

    #[test]
    fn test_out_of_range_health_clamped() {
        let config = RulConfig::default();
        assert_eq!(estimate_rul([("gearbox", -20.0)], &config)["gearbox"], 0);
        assert_eq!(estimate_rul([("gearbox", 250.0)], &config)["gearbox"], 8760);
    }

    #[test]
    fn test_nan_health_falls_back() {
        let config = RulConfig::default();
        let rul = estimate_rul([("gearbox", 80.0), ("generator", f64::NAN)], &config);
        assert_eq!(rul, fallback_rul(&config));
        assert_eq!(rul["blades"], 13_140);
    }
}
