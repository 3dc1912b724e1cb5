//! API route table.
//!
//! - `GET  /`                     service info
//! - `POST /predict/failure`      point assessment of a reading
//! - `GET  /api/predict`          component outlook (no-cache)
//! - `GET  /health/components`    component health + alert
//! - `GET  /maintenance/schedule` trend-based schedule
//! - `GET  /system/status`        overall status
//! - `POST /system/cycle`         full cycle on a reading
//! - `GET  /analytics/summary`    schedule counts + predicted failures
//! - `GET  /config`               active configuration
//! - `POST /config/validate`      validate a candidate configuration

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, ApiState};

pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/predict/failure", post(handlers::predict_failure))
        .route("/api/predict", get(handlers::component_predictions))
        .route("/health/components", get(handlers::component_health))
        .route("/maintenance/schedule", get(handlers::maintenance_schedule))
        .route("/system/status", get(handlers::system_status))
        .route("/system/cycle", post(handlers::run_cycle))
        .route("/analytics/summary", get(handlers::analytics_summary))
        .route("/config", get(handlers::get_config))
        .route("/config/validate", post(handlers::validate_config))
        .fallback(handlers::not_found)
        .with_state(state)
}
