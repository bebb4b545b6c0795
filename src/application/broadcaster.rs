// Broadcast trait for pushing dashboard events to subscribers
use crate::domain::event::DashboardEvent;
use tokio::sync::broadcast;

pub trait EventBroadcaster: Send + Sync {
    /// Deliver an event to every live subscriber, best effort.
    /// Returns how many subscribers the event was queued for.
    fn publish(&self, event: DashboardEvent) -> usize;

    /// Register a new subscriber; it receives every event published after this call
    fn subscribe(&self) -> broadcast::Receiver<DashboardEvent>;

    fn subscriber_count(&self) -> usize;
}
