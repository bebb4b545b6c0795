// Application state for HTTP and websocket handlers
use crate::application::monitor_service::MonitorService;

#[derive(Clone)]
pub struct AppState {
    pub monitor_service: MonitorService,
}
