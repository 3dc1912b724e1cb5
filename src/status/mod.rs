//! System Status Aggregator
//!
//! Folds the current health set and maintenance schedule into one verdict.
//! The ladder is evaluated top-down and the first matching rung wins:
//!
//! | rung     | condition (defaults)                                   |
//! |----------|--------------------------------------------------------|
//! | Optimal  | avg >= 90, no critical, no declining, nothing due      |
//! | Good     | avg >= 80, critical <= 1, declining <= 1               |
//! | Fair     | avg >= 70, critical <= 2                               |
//! | Poor     | avg >= 60                                              |
//! | Critical | otherwise                                              |
//!
//! An empty health set short-circuits to `Unknown` before the ladder.

use tracing::{debug, warn};

use crate::config::StatusConfig;
use crate::types::{
    Alert, ComponentHealthSet, MaintenanceItem, MaintenanceStatus, OverallStatus, StatusMetrics,
    SystemStatus, Trend,
};

const NO_DATA_MESSAGE: &str = "No component health data available";
const INVALID_DATA_MESSAGE: &str = "Component health data is invalid";

/// Aggregate health and schedule into a [`SystemStatus`].
pub fn aggregate(
    health: &ComponentHealthSet,
    maintenance: &[MaintenanceItem],
    config: &StatusConfig,
) -> SystemStatus {
    let due = maintenance
        .iter()
        .filter(|m| m.status == MaintenanceStatus::Due)
        .count();

    let Some(average_health) = health.average_score() else {
        warn!("Empty component health set, status unknown");
        return unknown(NO_DATA_MESSAGE, due);
    };
    if let Some(bad) = health.iter().find(|e| e.score > 100) {
        warn!(component = %bad.component, score = bad.score, "Health score out of range, status unknown");
        return unknown(INVALID_DATA_MESSAGE, due);
    }

    let critical = health.iter().filter(|e| e.score < config.critical_score).count();
    let declining = health.iter().filter(|e| e.trend == Trend::Declining).count();

    let status = if average_health >= config.optimal_min_average
        && critical == 0
        && declining == 0
        && due == 0
    {
        OverallStatus::Optimal
    } else if average_health >= config.good_min_average
        && critical <= config.good_max_critical
        && declining <= config.good_max_declining
    {
        OverallStatus::Good
    } else if average_health >= config.fair_min_average && critical <= config.fair_max_critical {
        OverallStatus::Fair
    } else if average_health >= config.poor_min_average {
        OverallStatus::Poor
    } else {
        OverallStatus::Critical
    };

    let mut recommendations: Vec<String> = base_recommendations(status)
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if due > 0 {
        recommendations.push(format!("Complete {due} due maintenance task(s)"));
    }
    if declining > 0 {
        recommendations.push(format!("Investigate {declining} component(s) with declining health"));
    }
    if critical > 0 {
        recommendations.push(format!(
            "Inspect {critical} component(s) below health score {}",
            config.critical_score
        ));
    }

    debug!(
        status = %status,
        average_health,
        critical,
        declining,
        due,
        "System status aggregated"
    );

    SystemStatus {
        status,
        severity: status.severity().to_string(),
        message: status_message(status).to_string(),
        recommendations,
        metrics: StatusMetrics {
            average_health,
            critical_components: critical,
            declining_components: declining,
            due_maintenance: due,
            total_components: health.len(),
        },
    }
}

/// First component (in set order) scoring below `threshold` or declining.
pub fn detect_alert(health: &ComponentHealthSet, threshold: u8) -> Alert {
    health
        .iter()
        .find(|e| e.score < threshold || e.trend == Trend::Declining)
        .map_or_else(Alert::none, |e| Alert {
            alert: true,
            component: Some(e.component.display_name().to_string()),
            message: Some(format!(
                "{} health at {} and {}",
                e.component.display_name(),
                e.score,
                e.trend
            )),
        })
}

fn unknown(message: &str, due: usize) -> SystemStatus {
    SystemStatus {
        status: OverallStatus::Unknown,
        severity: OverallStatus::Unknown.severity().to_string(),
        message: message.to_string(),
        recommendations: vec!["Verify sensor data feeds and rerun the health cycle".to_string()],
        metrics: StatusMetrics {
            due_maintenance: due,
            ..Default::default()
        },
    }
}

fn status_message(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Optimal => "All systems operating at peak performance",
        OverallStatus::Good => "Systems operating normally with minor concerns",
        OverallStatus::Fair => "Some components require attention",
        OverallStatus::Poor => "Multiple components showing degraded performance",
        OverallStatus::Critical => "Immediate attention required",
        OverallStatus::Unknown => NO_DATA_MESSAGE,
    }
}

fn base_recommendations(status: OverallStatus) -> &'static [&'static str] {
    match status {
        OverallStatus::Optimal => &["Continue routine monitoring"],
        OverallStatus::Good => &["Continue scheduled maintenance", "Monitor components with declining trends"],
        OverallStatus::Fair => &["Schedule inspection of components below threshold", "Review maintenance schedule"],
        OverallStatus::Poor => &["Prioritize maintenance of critical components", "Consider reducing operational load"],
        OverallStatus::Critical => &[
            "Initiate emergency maintenance procedures",
            "Consider shutting down turbine until inspection",
        ],
        OverallStatus::Unknown => &[],
    }
}
