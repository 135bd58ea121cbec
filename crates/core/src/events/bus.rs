use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::ModerationEvent;

/// In-process event bus backed by `tokio::broadcast`. One instance is
/// shared by every route handler; dashboards subscribe per connection.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<ModerationEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers. Returns how many
    /// subscribers received it; publishing with no subscribers is an error
    /// at the broadcast layer, which callers may ignore.
    pub fn publish(
        &self,
        event: ModerationEvent,
    ) -> Result<usize, broadcast::error::SendError<ModerationEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ModerationEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
