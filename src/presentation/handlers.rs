// HTTP request handlers
use crate::domain::driver::DriverRecord;
use crate::domain::statistics::SessionStatistics;
use crate::domain::telemetry::TelemetrySnapshot;
use crate::infrastructure::http_response::ok_response;
use crate::presentation::app_state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Liveness probe kept for older sensor firmware
pub async fn test_probe() -> Response {
    ok_response()
}

/// Receive an eye report from the sensing device.
/// The body is parsed as JSON whatever the declared content type.
pub async fn receive_eye_report(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.monitor_service.ingest(&body).await {
        Ok(_) => ok_response(),
        Err(e) => {
            tracing::warn!("Rejected eye report: {}", e);
            e.into_response()
        }
    }
}

/// Latest eye snapshot
pub async fn latest_eye_status(State(state): State<Arc<AppState>>) -> Json<TelemetrySnapshot> {
    Json(state.monitor_service.snapshot().await)
}

pub async fn get_statistics(State(state): State<Arc<AppState>>) -> Json<SessionStatistics> {
    Json(state.monitor_service.statistics().await)
}

pub async fn reset_statistics(State(state): State<Arc<AppState>>) -> Response {
    state.monitor_service.reset_statistics().await;
    ok_response()
}

pub async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<DriverRecord>> {
    Json(state.monitor_service.drivers().to_vec())
}
