// Monitor service - Ingestion, statistics and dashboard fan-out
use crate::application::broadcaster::EventBroadcaster;
use crate::domain::driver::DriverRecord;
use crate::domain::ear::simulate_ear;
use crate::domain::error::ValidationError;
use crate::domain::event::{DashboardEvent, SosAlert, SosRequest};
use crate::domain::session::MonitorSession;
use crate::domain::statistics::SessionStatistics;
use crate::domain::telemetry::{EyeReport, TelemetrySnapshot};
use chrono::Local;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// A freshly connected dashboard: the state replay to send first, then the live feed
pub struct Subscription {
    pub id: u64,
    pub catch_up: Vec<DashboardEvent>,
    pub updates: broadcast::Receiver<DashboardEvent>,
}

#[derive(Clone)]
pub struct MonitorService {
    session: Arc<Mutex<MonitorSession>>,
    broadcaster: Arc<dyn EventBroadcaster>,
    drivers: Arc<Vec<DriverRecord>>,
    next_subscriber_id: Arc<AtomicU64>,
}

impl MonitorService {
    pub fn new(
        broadcaster: Arc<dyn EventBroadcaster>,
        drivers: Vec<DriverRecord>,
        history_capacity: usize,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(MonitorSession::new(Local::now(), history_capacity))),
            broadcaster,
            drivers: Arc::new(drivers),
            next_subscriber_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Validate a raw eye report, update the session and push the new state to every dashboard.
    ///
    /// The session lock is held from the snapshot swap through the broadcast so
    /// that a subscriber connecting concurrently sees either the state before
    /// this report together with its broadcast, or the state after it.
    pub async fn ingest(&self, body: &[u8]) -> Result<TelemetrySnapshot, ValidationError> {
        let report = EyeReport::parse(body)?;

        let mut session = self.session.lock().await;
        let ear_value = simulate_ear(&report.status);
        session.apply(&report, ear_value, Local::now());

        let snapshot = session.snapshot().clone();
        self.broadcaster
            .publish(DashboardEvent::EyeStatus(snapshot.clone()));
        self.broadcaster
            .publish(DashboardEvent::StatisticsUpdate(session.statistics().clone()));
        drop(session);

        tracing::info!(
            "EAR={:.3} | Status={} | Duration={}",
            snapshot.ear_value,
            snapshot.status,
            snapshot.duration
        );
        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> TelemetrySnapshot {
        self.session.lock().await.snapshot().clone()
    }

    pub async fn statistics(&self) -> SessionStatistics {
        self.session.lock().await.statistics().clone()
    }

    /// Start a new statistics session; the latest snapshot is kept
    pub async fn reset_statistics(&self) -> SessionStatistics {
        let mut session = self.session.lock().await;
        session.reset_statistics(Local::now());
        let statistics = session.statistics().clone();
        self.broadcaster
            .publish(DashboardEvent::StatisticsUpdate(statistics.clone()));
        drop(session);

        tracing::info!("Session statistics reset");
        statistics
    }

    pub fn drivers(&self) -> &[DriverRecord] {
        &self.drivers
    }

    /// Register a dashboard and capture its catch-up replay atomically with respect to ingestion
    pub async fn connect_subscriber(&self) -> Subscription {
        let session = self.session.lock().await;
        let updates = self.broadcaster.subscribe();
        let catch_up = vec![
            DashboardEvent::EyeStatus(session.snapshot().clone()),
            DashboardEvent::StatisticsUpdate(session.statistics().clone()),
            DashboardEvent::DriversUpdate(self.drivers.as_ref().clone()),
        ];
        drop(session);

        Subscription {
            id: self.next_subscriber_id.fetch_add(1, Ordering::Relaxed),
            catch_up,
            updates,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.broadcaster.subscriber_count()
    }

    pub fn relay_sos(&self, request: SosRequest) -> SosAlert {
        let alert = SosAlert::from(request);
        tracing::warn!(
            driver_id = %alert.driver_id,
            location = %alert.location,
            "SOS emergency received"
        );
        self.broadcaster.publish(DashboardEvent::SosAlert(alert.clone()));
        alert
    }

    pub fn relay_message(&self, payload: Value) {
        tracing::debug!("Message received: {}", payload);
        self.broadcaster.publish(DashboardEvent::Message(payload));
    }
}
