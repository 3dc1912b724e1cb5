//! RUL & Maintenance Scheduling
//!
//! Two independent estimates:
//! - `rul`: hours of remaining life per component, scaled from health scores
//! - `schedule`: next-service dates per maintenance item, from trend slopes
//!
//! Both degrade to canned values instead of returning errors.

mod rul;
mod schedule;

pub use rul::{estimate_rul, fallback_rul};
pub use schedule::{classify, fallback_schedule, MaintenanceScheduler, ScheduleError};
