// Monitoring session: latest snapshot plus running statistics
use super::statistics::SessionStatistics;
use super::telemetry::{EyeReport, TelemetrySnapshot};
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn unix_seconds(at: &DateTime<Local>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}

/// Mutable session state. Callers serialize access; every method assumes exclusive ownership.
#[derive(Debug, Clone)]
pub struct MonitorSession {
    snapshot: TelemetrySnapshot,
    statistics: SessionStatistics,
}

impl MonitorSession {
    pub fn new(started_at: DateTime<Local>, history_capacity: usize) -> Self {
        Self {
            snapshot: TelemetrySnapshot::initial(format_timestamp(&started_at)),
            statistics: SessionStatistics::new(unix_seconds(&started_at), history_capacity),
        }
    }

    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.statistics
    }

    /// Replace the snapshot and fold the report into the statistics.
    ///
    /// The alert transition is measured against the snapshot being replaced.
    pub fn apply(&mut self, report: &EyeReport, ear_value: f64, at: DateTime<Local>) {
        let timestamp = format_timestamp(&at);
        let next = TelemetrySnapshot::from_report(report, ear_value, timestamp.clone());
        let previous = std::mem::replace(&mut self.snapshot, next);

        self.statistics
            .record(report, ear_value, previous.alert_level.as_deref(), timestamp);
    }

    /// Reset statistics only; the snapshot is left as is
    pub fn reset_statistics(&mut self, at: DateTime<Local>) {
        self.statistics.reset(unix_seconds(&at));
    }
}
