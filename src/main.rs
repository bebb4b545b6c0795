// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::monitor_service::MonitorService;
use crate::infrastructure::channel_broadcaster::ChannelBroadcaster;
use crate::infrastructure::config::{load_drivers_config, load_server_config};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_statistics, health_check, latest_eye_status, list_drivers, receive_eye_report, reset_statistics, test_probe,
};
use crate::presentation::socket::dashboard_socket;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config()?;
    let drivers = load_drivers_config()?.roster();

    // Create broadcaster (infrastructure layer)
    let broadcaster = Arc::new(ChannelBroadcaster::new(server_config.monitor.broadcast_capacity));

    // Create services (application layer)
    let monitor_service = MonitorService::new(
        broadcaster,
        drivers,
        server_config.monitor.history_capacity,
    );

    // Create application state
    let state = Arc::new(AppState { monitor_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/test", get(test_probe))
        .route("/eye", get(latest_eye_status).post(receive_eye_report))
        .route("/statistics", get(get_statistics))
        .route("/reset_stats", post(reset_statistics))
        .route("/drivers", get(list_drivers))
        .route("/ws", get(dashboard_socket))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = server_config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting drowsiness-monitor on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
