// Broadcaster backed by a tokio broadcast channel
use crate::application::broadcaster::EventBroadcaster;
use crate::domain::event::DashboardEvent;
use tokio::sync::broadcast;

/// Fan-out over `tokio::sync::broadcast`. Slow subscribers lose the oldest
/// queued events once `capacity` is exceeded; nothing is retried.
#[derive(Debug, Clone)]
pub struct ChannelBroadcaster {
    sender: broadcast::Sender<DashboardEvent>,
}

impl ChannelBroadcaster {
    /// `capacity` must be non-zero
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl EventBroadcaster for ChannelBroadcaster {
    fn publish(&self, event: DashboardEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(delivered) => delivered,
            Err(_) => {
                tracing::debug!("No dashboards connected, dropping {}", name);
                0
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let broadcaster = ChannelBroadcaster::new(8);
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();

        let delivered = broadcaster.publish(DashboardEvent::Message(json!("hi")));
        assert_eq!(delivered, 2);
        assert_eq!(a.recv().await.unwrap(), DashboardEvent::Message(json!("hi")));
        assert_eq!(b.recv().await.unwrap(), DashboardEvent::Message(json!("hi")));
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let broadcaster = ChannelBroadcaster::new(8);
        assert_eq!(broadcaster.publish(DashboardEvent::Message(json!(1))), 0);
    }

    #[test]
    fn test_dropped_subscriber_is_forgotten() {
        let broadcaster = ChannelBroadcaster::new(8);
        let keep = broadcaster.subscribe();
        let gone = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(gone);
        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(broadcaster.publish(DashboardEvent::Message(json!(1))), 1);
        drop(keep);
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags_instead_of_blocking() {
        let broadcaster = ChannelBroadcaster::new(2);
        let mut slow = broadcaster.subscribe();
        for i in 0..5 {
            broadcaster.publish(DashboardEvent::Message(json!(i)));
        }

        assert!(matches!(slow.recv().await, Err(RecvError::Lagged(3))));
        assert_eq!(slow.recv().await.unwrap(), DashboardEvent::Message(json!(3)));
    }
}
