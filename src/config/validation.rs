//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Arrays of tables (`health.components`, `schedule.items`) are validated by
/// serde, so only their parent key appears here. Any new field added to
/// EngineConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [turbine]
        "turbine",
        "turbine.id",
        "turbine.site",
        // [estimator]
        "estimator",
        "estimator.default_classifier_probability",
        "estimator.default_sequence_probability",
        "estimator.classifier_weight",
        "estimator.sequence_weight",
        "estimator.failure_threshold",
        "estimator.medium_risk_threshold",
        "estimator.high_risk_threshold",
        "estimator.gear_oil_temp_action_c",
        "estimator.nacelle_temp_action_c",
        "estimator.rotor_rpm_action",
        "estimator.fallback_probability",
        "estimator.fallback_confidence",
        // [features]
        "features",
        "features.max_features",
        // [health]
        "health",
        "health.ml_weight",
        "health.factor_weight",
        "health.critical_score",
        "health.trend_dead_band",
        "health.components",
        // [penalty]
        "penalty",
        "penalty.gear_oil_temp_limit_c",
        "penalty.gear_oil_temp_penalty",
        "penalty.oil_pressure_min_bar",
        "penalty.oil_pressure_penalty",
        "penalty.generator_temp_limit_c",
        "penalty.generator_temp_penalty",
        "penalty.blade_pitch_limit_deg",
        "penalty.blade_pitch_penalty",
        "penalty.nacelle_temp_limit_c",
        "penalty.nacelle_temp_penalty",
        // [rul]
        "rul",
        "rul.baseline_hours",
        "rul.fallback_health_percent",
        // [schedule]
        "schedule",
        "schedule.window_len",
        "schedule.sensitivity_days",
        "schedule.min_rul_days",
        "schedule.due_within_days",
        "schedule.scheduled_within_days",
        "schedule.monitoring_within_days",
        "schedule.assessment_horizon_days",
        "schedule.items",
        // [status]
        "status",
        "status.critical_score",
        "status.optimal_min_average",
        "status.good_min_average",
        "status.good_max_critical",
        "status.good_max_declining",
        "status.fair_min_average",
        "status.fair_max_critical",
        "status.poor_min_average",
        // [server]
        "server",
        "server.addr",
        "server.cors_origins",
    ];
    keys.iter().copied().collect()
}

/// Tables whose child keys are user-defined names (map-valued fields).
fn open_tables() -> &'static [&'static str] {
    &["rul.baseline_hours"]
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

/// Collect the dotted paths of every NaN or infinite float in a value tree,
/// including floats nested in arrays.
pub fn non_finite_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    match value {
        toml::Value::Float(f) if !f.is_finite() => vec![prefix.to_string()],
        toml::Value::Table(table) => table
            .iter()
            .flat_map(|(k, v)| {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                non_finite_keys(v, &path)
            })
            .collect(),
        toml::Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(i, v)| non_finite_keys(v, &format!("{prefix}[{i}]")))
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are stable across runs
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let open = open_tables();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if known.contains(key.as_str()) {
            continue;
        }
        if open
            .iter()
            .any(|t| key.strip_prefix(t).is_some_and(|rest| rest.starts_with('.')))
        {
            continue;
        }
        let suggestion = suggest_correction(key, &known);
        warnings.push(ValidationWarning {
            field: key.clone(),
            message: format!("Unknown config key '{key}'"),
            suggestion,
        });
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent startup; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::EngineConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let p = &config.penalty;

    // Oil pressure cannot be negative
    if p.oil_pressure_min_bar < 0.0 {
        errors.push(format!(
            "penalty.oil_pressure_min_bar = {:.2} cannot be negative",
            p.oil_pressure_min_bar
        ));
    }

    // Scores are percentages
    if config.health.critical_score > 100 {
        errors.push(format!(
            "health.critical_score = {} is outside 0-100",
            config.health.critical_score
        ));
    }
    if config.status.critical_score > 100 {
        errors.push(format!(
            "status.critical_score = {} is outside 0-100",
            config.status.critical_score
        ));
    }

    // Pitch limit is a magnitude
    if p.blade_pitch_limit_deg < 0.0 || p.blade_pitch_limit_deg > 180.0 {
        errors.push(format!(
            "penalty.blade_pitch_limit_deg = {:.1} is outside 0-180 degrees",
            p.blade_pitch_limit_deg
        ));
    }

    // Temperature limits: suspicious outside the usual nacelle equipment envelope
    for (field, value, lo, hi) in [
        ("penalty.gear_oil_temp_limit_c", p.gear_oil_temp_limit_c, 40.0, 150.0),
        ("penalty.generator_temp_limit_c", p.generator_temp_limit_c, 40.0, 180.0),
        ("penalty.nacelle_temp_limit_c", p.nacelle_temp_limit_c, 20.0, 120.0),
        ("estimator.gear_oil_temp_action_c", config.estimator.gear_oil_temp_action_c, 40.0, 150.0),
        ("estimator.nacelle_temp_action_c", config.estimator.nacelle_temp_action_c, 20.0, 120.0),
    ] {
        if value < lo || value > hi {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} = {value:.1} is outside typical range ({lo:.0}-{hi:.0} °C)"),
                suggestion: None,
            });
        }
    }

    // Rotor speed: utility-scale rotors rarely exceed 40 RPM
    let rpm = config.estimator.rotor_rpm_action;
    if rpm <= 0.0 || rpm > 40.0 {
        warnings.push(ValidationWarning {
            field: "estimator.rotor_rpm_action".to_string(),
            message: format!("estimator.rotor_rpm_action = {rpm:.1} is outside typical range (0-40 RPM)"),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("thresold", "threshold"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [estimator]
            high_risk_threshold = 0.7
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"estimator".to_string()));
        assert!(keys.contains(&"estimator.high_risk_threshold".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[estimator]
high_risk_threshhold = 0.7
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("high_risk_threshhold"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("estimator.high_risk_threshold")
        );
    }

    #[test]
    fn test_open_table_children_are_not_flagged() {
        let toml_str = r#"
[rul.baseline_hours]
gearbox = 9000
yaw_drive = 20000
"#;
        assert!(validate_unknown_keys(toml_str).is_empty());
    }

    #[test]
    fn test_component_array_contents_are_left_to_serde() {
        let toml_str = r#"
[[health.components]]
component = "gearbox"
base_score = 60.0
"#;
        assert!(validate_unknown_keys(toml_str).is_empty());
    }

    #[test]
    fn test_non_finite_keys_found_in_arrays() {
        let mut table = toml::map::Map::new();
        table.insert(
            "xs".to_string(),
            toml::Value::Array(vec![toml::Value::Float(1.0), toml::Value::Float(f64::NAN)]),
        );
        let bad = non_finite_keys(&toml::Value::Table(table), "");
        assert_eq!(bad, vec!["xs[1]".to_string()]);
    }

    #[test]
    fn test_negative_oil_pressure_is_error() {
        let mut config = crate::config::EngineConfig::default();
        config.penalty.oil_pressure_min_bar = -1.0;
        let (errors, _) = validate_physical_ranges(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("oil_pressure_min_bar"));
    }

    #[test]
    fn test_odd_temperature_limit_only_warns() {
        let mut config = crate::config::EngineConfig::default();
        config.penalty.gear_oil_temp_limit_c = 200.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "penalty.gear_oil_temp_limit_c");
    }
}
