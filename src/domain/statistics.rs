// Session statistics domain model
use super::telemetry::{EyeReport, HistoryEntry};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatistics {
    pub total_alerts: u64,
    /// Unix seconds
    #[serde(rename = "current_session_start")]
    pub session_start: f64,
    pub max_closure_time: f64,
    #[serde(rename = "alert_history")]
    pub history: VecDeque<HistoryEntry>,
    #[serde(skip)]
    capacity: usize,
}

impl SessionStatistics {
    pub fn new(session_start: f64, capacity: usize) -> Self {
        Self {
            total_alerts: 0,
            session_start,
            max_closure_time: 0.0,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Fold one accepted report into the session.
    ///
    /// `previous_alert_level` is the alert level of the snapshot this report
    /// replaced, not the level of the last history entry.
    pub fn record(
        &mut self,
        report: &EyeReport,
        ear_value: f64,
        previous_alert_level: Option<&str>,
        timestamp: String,
    ) {
        if let Some(level) = report.effective_alert_level() {
            if previous_alert_level != Some(level) {
                self.total_alerts += 1;
            }
        }

        if report.status == "closed" && report.duration > self.max_closure_time {
            self.max_closure_time = report.duration;
        }

        self.history.push_back(HistoryEntry::new(report, ear_value, timestamp));
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    /// Start a fresh session, keeping the configured history capacity
    pub fn reset(&mut self, session_start: f64) {
        *self = Self::new(session_start, self.capacity);
    }
}
