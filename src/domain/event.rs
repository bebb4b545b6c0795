// Dashboard events pushed to and received from subscribers
use super::driver::DriverRecord;
use super::statistics::SessionStatistics;
use super::telemetry::TelemetrySnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound frame, serialized as `{"event": "...", "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    EyeStatus(TelemetrySnapshot),
    StatisticsUpdate(SessionStatistics),
    DriversUpdate(Vec<DriverRecord>),
    SosAlert(SosAlert),
    Message(Value),
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::EyeStatus(_) => "eye_status",
            DashboardEvent::StatisticsUpdate(_) => "statistics_update",
            DashboardEvent::DriversUpdate(_) => "drivers_update",
            DashboardEvent::SosAlert(_) => "sos_alert",
            DashboardEvent::Message(_) => "message",
        }
    }
}

/// Inbound frame from a dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    SosEmergency(SosRequest),
    Message(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SosRequest {
    #[serde(default)]
    pub driver_id: Value,
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub location: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SosAlert {
    pub driver_id: Value,
    pub timestamp: Value,
    pub location: Value,
    pub emergency: bool,
}

impl From<SosRequest> for SosAlert {
    fn from(request: SosRequest) -> Self {
        Self {
            driver_id: request.driver_id,
            timestamp: request.timestamp,
            location: request.location,
            emergency: true,
        }
    }
}
