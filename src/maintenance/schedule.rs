//! Trend-based maintenance schedule.
//!
//! For every configured item the sample source provides a short window of
//! factor series. The predicted RUL moves with the averaged slope:
//!
//! ```text
//! slope_i   = (last_i - first_i) / window_len
//! rul_days  = max(baseline_rul_days + mean(slope_i) * sensitivity_days, min_rul_days)
//! ```
//!
//! Days until service then pick status and priority from the escalation
//! windows (Due / Scheduled / Monitoring / Completed).

use chrono::{Days, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{MaintenanceItemSpec, ScheduleConfig};
use crate::simulation::{SampleError, SampleSource};
use crate::types::{MaintenanceItem, MaintenanceStatus, Priority};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("No maintenance items configured")]
    NoItems,

    #[error("{component}: expected {expected} trend series, got {actual}")]
    FactorCount {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("{component}: trend series needs at least 2 samples, got {len}")]
    ShortWindow { component: String, len: usize },

    #[error("{0}: trend window contains non-finite values")]
    NonFinite(String),

    #[error("{0}: service date out of range")]
    DateOverflow(String),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

#[derive(Debug, Clone)]
pub struct MaintenanceScheduler {
    config: ScheduleConfig,
}

impl MaintenanceScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Predict the schedule for every configured item, in configured order.
    ///
    /// Any failure replaces the whole schedule with [`fallback_schedule`].
    pub fn schedule(&self, source: &dyn SampleSource, today: NaiveDate) -> Vec<MaintenanceItem> {
        match self.try_schedule(source, today) {
            Ok(items) => {
                debug!(
                    items = items.len(),
                    due = items.iter().filter(|i| i.status == MaintenanceStatus::Due).count(),
                    "Maintenance schedule predicted"
                );
                items
            }
            Err(e) => {
                warn!(error = %e, "Maintenance scheduling failed, using canned schedule");
                fallback_schedule(today)
            }
        }
    }

    fn try_schedule(&self, source: &dyn SampleSource, today: NaiveDate) -> Result<Vec<MaintenanceItem>, ScheduleError> {
        if self.config.items.is_empty() {
            return Err(ScheduleError::NoItems);
        }
        self.config
            .items
            .iter()
            .map(|spec| {
                let window = source.trend_window(spec, self.config.window_len)?;
                let rul_days = self.predict_rul_days(spec, &window)?;
                build_item(spec, rul_days, today, &self.config)
            })
            .collect()
    }

    /// Trend-adjusted RUL in days for one item.
    pub fn predict_rul_days(&self, spec: &MaintenanceItemSpec, window: &[Vec<f64>]) -> Result<u32, ScheduleError> {
        if window.len() != spec.factor_count {
            return Err(ScheduleError::FactorCount {
                component: spec.component.clone(),
                expected: spec.factor_count,
                actual: window.len(),
            });
        }

        let mut slopes = Vec::with_capacity(window.len());
        for series in window {
            let (Some(first), Some(last)) = (series.first(), series.last()) else {
                return Err(ScheduleError::ShortWindow { component: spec.component.clone(), len: 0 });
            };
            if series.len() < 2 {
                return Err(ScheduleError::ShortWindow {
                    component: spec.component.clone(),
                    len: series.len(),
                });
            }
            if series.iter().any(|v| !v.is_finite()) {
                return Err(ScheduleError::NonFinite(spec.component.clone()));
            }
            slopes.push((last - first) / series.len() as f64);
        }

        let mean_slope = slopes.iter().sum::<f64>() / slopes.len() as f64;
        let predicted = spec.baseline_rul_days + mean_slope * self.config.sensitivity_days;
        if !predicted.is_finite() {
            return Err(ScheduleError::NonFinite(spec.component.clone()));
        }
        Ok(predicted.max(f64::from(self.config.min_rul_days)).floor() as u32)
    }
}

/// Status and priority for a service `days` away.
pub fn classify(days: i64, config: &ScheduleConfig) -> (MaintenanceStatus, Priority) {
    if days <= config.due_within_days {
        (MaintenanceStatus::Due, Priority::High)
    } else if days <= config.scheduled_within_days {
        (MaintenanceStatus::Scheduled, Priority::Medium)
    } else if days <= config.monitoring_within_days {
        (MaintenanceStatus::Monitoring, Priority::Low)
    } else {
        (MaintenanceStatus::Completed, Priority::Low)
    }
}

fn build_item(
    spec: &MaintenanceItemSpec,
    rul_days: u32,
    today: NaiveDate,
    config: &ScheduleConfig,
) -> Result<MaintenanceItem, ScheduleError> {
    let next_service = today
        .checked_add_days(Days::new(u64::from(rul_days)))
        .ok_or_else(|| ScheduleError::DateOverflow(spec.component.clone()))?;
    let last_service = service_before(next_service, spec.service_interval_days).min(today);
    let (status, priority) = classify(i64::from(rul_days), config);

    Ok(MaintenanceItem {
        component: spec.component.clone(),
        message: spec.message.clone(),
        last_service,
        next_service,
        duration: spec.duration.clone(),
        priority,
        status,
        rul_days,
    })
}

fn service_before(next: NaiveDate, interval_days: i64) -> NaiveDate {
    next.checked_sub_days(Days::new(interval_days.max(0).unsigned_abs()))
        .unwrap_or(NaiveDate::MIN)
}

// ============================================================================
// Canned Schedule
// ============================================================================

struct CannedItem {
    component: &'static str,
    message: &'static str,
    duration: &'static str,
    status: MaintenanceStatus,
    priority: Priority,
    rul_days: u32,
    interval_days: i64,
}

const CANNED: [CannedItem; 4] = [
    CannedItem {
        component: "Gearbox Oil",
        message: "Oil change and filter replacement required",
        duration: "4 hours",
        status: MaintenanceStatus::Due,
        priority: Priority::High,
        rul_days: 5,
        interval_days: 60,
    },
    CannedItem {
        component: "Blade Inspection",
        message: "Visual inspection and surface treatment",
        duration: "6 hours",
        status: MaintenanceStatus::Scheduled,
        priority: Priority::Medium,
        rul_days: 25,
        interval_days: 180,
    },
    CannedItem {
        component: "Generator Bearing",
        message: "Bearing lubrication and alignment check",
        duration: "3 hours",
        status: MaintenanceStatus::Completed,
        priority: Priority::Low,
        rul_days: 120,
        interval_days: 180,
    },
    CannedItem {
        component: "Control System",
        message: "Software update and sensor calibration",
        duration: "2 hours",
        status: MaintenanceStatus::Monitoring,
        priority: Priority::Medium,
        rul_days: 60,
        interval_days: 90,
    },
];

/// Fixed four-item schedule, dated relative to `today`.
pub fn fallback_schedule(today: NaiveDate) -> Vec<MaintenanceItem> {
    CANNED
        .iter()
        .map(|c| {
            let next_service = today
                .checked_add_days(Days::new(u64::from(c.rul_days)))
                .unwrap_or(today);
            MaintenanceItem {
                component: c.component.to_string(),
                message: c.message.to_string(),
                last_service: service_before(next_service, c.interval_days).min(today),
                next_service,
                duration: c.duration.to_string(),
                priority: c.priority,
                status: c.status,
                rul_days: c.rul_days,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ScriptedSampleSource;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn scheduler() -> MaintenanceScheduler {
        MaintenanceScheduler::new(ScheduleConfig::default())
    }

    #[test]
    fn test_flat_trend_uses_baselines() {
        let s = scheduler();
        let source = ScriptedSampleSource::default().flat_windows(&s.config().items, 30);
        let items = s.schedule(&source, today());

        let summary: Vec<(&str, u32, MaintenanceStatus, Priority)> = items
            .iter()
            .map(|i| (i.component.as_str(), i.rul_days, i.status, i.priority))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Gearbox Oil", 6, MaintenanceStatus::Due, Priority::High),
                ("Blade Inspection", 25, MaintenanceStatus::Scheduled, Priority::Medium),
                ("Generator Bearing", 120, MaintenanceStatus::Completed, Priority::Low),
                ("Control System", 60, MaintenanceStatus::Monitoring, Priority::Low),
            ]
        );
        assert_eq!(items[0].next_service, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(items[0].last_service, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
    }

    #[test]
    fn test_slope_shifts_rul() {
        let s = scheduler();
        let spec = &s.config().items[1];
        // slopes 1.0, 0.5 and 0.0, mean 0.5 -> +15 days
        let window = vec![vec![0.0, 2.0], vec![0.0, 1.0], vec![3.0, 3.0]];
        assert_eq!(s.predict_rul_days(spec, &window).unwrap(), 40);
    }

    #[test]
    fn test_rul_never_below_minimum() {
        let s = scheduler();
        let spec = &s.config().items[0];
        let window = vec![vec![100.0, 0.0]; spec.factor_count];
        assert_eq!(s.predict_rul_days(spec, &window).unwrap(), 1);
    }

    #[test]
    fn test_classification_boundaries() {
        let c = ScheduleConfig::default();
        assert_eq!(classify(7, &c), (MaintenanceStatus::Due, Priority::High));
        assert_eq!(classify(8, &c), (MaintenanceStatus::Scheduled, Priority::Medium));
        assert_eq!(classify(30, &c), (MaintenanceStatus::Scheduled, Priority::Medium));
        assert_eq!(classify(90, &c), (MaintenanceStatus::Monitoring, Priority::Low));
        assert_eq!(classify(91, &c), (MaintenanceStatus::Completed, Priority::Low));
    }

    #[test]
    fn test_malformed_windows_fall_back() {
        let s = scheduler();
        let canned = fallback_schedule(today());

        // missing window
        assert_eq!(s.schedule(&ScriptedSampleSource::default(), today()), canned);

        // single-sample series
        let short_err = s.predict_rul_days(&s.config().items[0], &[vec![1.0], vec![1.0], vec![1.0]]);
        assert!(matches!(short_err, Err(ScheduleError::ShortWindow { len: 1, .. })));

        // NaN sample
        let nan = vec![vec![0.0, f64::NAN], vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(
            s.predict_rul_days(&s.config().items[0], &nan),
            Err(ScheduleError::NonFinite("Gearbox Oil".to_string()))
        );

        // wrong series count
        let wrong = ScriptedSampleSource::default().with_window("Gearbox Oil", vec![vec![0.0, 1.0]]);
        assert_eq!(s.schedule(&wrong, today()), canned);
    }

    #[test]
    fn test_canned_schedule_shape() {
        let canned = fallback_schedule(today());
        let statuses: Vec<MaintenanceStatus> = canned.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![
                MaintenanceStatus::Due,
                MaintenanceStatus::Scheduled,
                MaintenanceStatus::Completed,
                MaintenanceStatus::Monitoring,
            ]
        );
        assert!(canned.iter().all(|i| i.next_service >= today() && i.last_service <= today()));
    }
}
