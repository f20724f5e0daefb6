//! Fan-out of reload events to connected browsers.

use tokio::sync::broadcast;
use tracing::trace;

use super::ReloadEvent;

const CHANNEL_CAPACITY: usize = 64;

/// Broadcast hub shared by the watcher and every SSE connection.
///
/// Cloning is cheap; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadEvent>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.tx.subscribe()
    }

    /// Publish `event`, returning how many subscribers received it.
    pub fn publish(&self, event: ReloadEvent) -> usize {
        let delivered = self.tx.send(event).unwrap_or(0);
        trace!(delivered, "published reload event");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let hub = ReloadHub::new();
        assert_eq!(hub.publish(ReloadEvent::Connected), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_events() {
        let hub = ReloadHub::new();
        let mut first = hub.subscribe();
        let mut second = hub.clone().subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        let event = ReloadEvent::Reload {
            path: "index.html".to_string(),
        };
        assert_eq!(hub.publish(event.clone()), 2);
        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }
}
