//! HTTP handlers - thin wrappers around [`MaintenanceEngine`].
//!
//! All handlers return `Response` via [`ApiResponse::ok`] or [`ApiErrorResponse`].
//! Engine operations never fail, so the only error responses are malformed
//! request bodies.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::EngineConfig;
use crate::engine::MaintenanceEngine;
use crate::simulation::SampleSource;
use crate::types::{Alert, ComponentHealthSet, SensorReading};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<MaintenanceEngine>,
    /// Supplies demo readings and trend windows for the GET endpoints
    pub samples: Arc<dyn SampleSource>,
}

impl ApiState {
    pub fn new(engine: MaintenanceEngine, samples: Arc<dyn SampleSource>) -> Self {
        Self {
            engine: Arc::new(engine),
            samples,
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub turbine: String,
    pub models_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealthResponse {
    pub components: ComponentHealthSet,
    pub alert: Alert,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - service info
pub async fn root(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(ServiceInfo {
        message: "Wind Turbine Predictive Maintenance API",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        turbine: state.engine.config().turbine.id.clone(),
        models_loaded: state.engine.models_loaded(),
    })
}

/// POST /predict/failure - point assessment of a submitted reading
pub async fn predict_failure(
    State(state): State<ApiState>,
    body: Result<Json<SensorReading>, JsonRejection>,
) -> Response {
    let Json(reading) = match body {
        Ok(b) => b,
        Err(e) => return ApiErrorResponse::bad_request(e.body_text()),
    };
    ApiResponse::ok(state.engine.assess(&reading, today()))
}

/// GET /api/predict - component outlook on a sampled reading
pub async fn component_predictions(State(state): State<ApiState>) -> Response {
    let reading = state.samples.reading();
    ApiResponse::ok_no_cache(state.engine.outlook(&reading))
}

/// GET /health/components - one scoring cycle on a sampled reading
pub async fn component_health(State(state): State<ApiState>) -> Response {
    let reading = state.samples.reading();
    let report = state.engine.run_cycle(&reading, state.samples.as_ref(), today());
    ApiResponse::ok(ComponentHealthResponse {
        components: report.components,
        alert: report.alert,
    })
}

/// GET /maintenance/schedule - trend-based schedule
pub async fn maintenance_schedule(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(state.engine.schedule(state.samples.as_ref(), today()))
}

/// GET /system/status - full cycle on a sampled reading, status only
pub async fn system_status(State(state): State<ApiState>) -> Response {
    let reading = state.samples.reading();
    let report = state.engine.run_cycle(&reading, state.samples.as_ref(), today());
    ApiResponse::ok(report.status)
}

/// GET /analytics/summary - schedule counts and failure outlook on a sampled reading
pub async fn analytics_summary(State(state): State<ApiState>) -> Response {
    let reading = state.samples.reading();
    ApiResponse::ok(state.engine.analytics(&reading, state.samples.as_ref(), today()))
}

/// POST /system/cycle - full cycle on a submitted reading
pub async fn run_cycle(
    State(state): State<ApiState>,
    body: Result<Json<SensorReading>, JsonRejection>,
) -> Response {
    let Json(reading) = match body {
        Ok(b) => b,
        Err(e) => return ApiErrorResponse::bad_request(e.body_text()),
    };
    ApiResponse::ok(state.engine.run_cycle(&reading, state.samples.as_ref(), today()))
}

/// GET /config - active engine configuration
pub async fn get_config(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(state.engine.config().clone())
}

/// POST /config/validate - validate a candidate configuration without applying it
pub async fn validate_config(body: Result<Json<EngineConfig>, JsonRejection>) -> Response {
    let Json(candidate) = match body {
        Ok(b) => b,
        Err(e) => return ApiErrorResponse::bad_request(e.body_text()),
    };
    match candidate.validate() {
        Ok(()) => ApiResponse::ok(serde_json::json!({
            "valid": true,
            "message": "Configuration is valid"
        })),
        Err(crate::config::ConfigError::Validation(errors)) => {
            debug!(errors = errors.len(), "Candidate config rejected");
            ApiResponse::ok(serde_json::json!({
                "valid": false,
                "errors": errors
            }))
        }
        Err(e) => ApiErrorResponse::bad_request(format!("Validation error: {e}")),
    }
}

/// Fallback for unmatched paths
pub async fn not_found() -> Response {
    ApiErrorResponse::not_found("No such endpoint")
}
