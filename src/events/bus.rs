//! # Event bus for broadcasting flow events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that lets
//! every stage publish observability events without blocking on whoever is
//! listening.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or fails; with no
//!   active receivers the event is simply dropped.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; receivers that fall behind observe `RecvError::Lagged` and
//!   skip the oldest items.
//! - **No persistence**: events are fire-and-forget.

use tokio::sync::broadcast;

use super::event::FlowEvent;

/// Broadcast channel for flow events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); every stage in
/// a flow holds its own clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<FlowEvent>,
}

impl Bus {
    /// Creates a new bus with the given ring-buffer capacity.
    ///
    /// Capacity is shared across all receivers and clamped to a minimum
    /// of 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<FlowEvent>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// Takes ownership of the event; the broadcast channel clones it per
    /// receiver. With no receivers the event is dropped.
    pub fn publish(&self, ev: FlowEvent) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver observing subsequent events.
    ///
    /// Each call creates an independent receiver that only sees events
    /// published after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<FlowEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        bus.publish(FlowEvent::new(EventKind::SourceEmitted).with_node("seq"));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::SourceEmitted);
        assert_eq!(ev.node.as_deref(), Some("seq"));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let bus = Bus::new(16);
        bus.publish(FlowEvent::new(EventKind::Handled));
        // A receiver created afterwards sees nothing.
        let mut rx = bus.subscribe();
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_capacity_is_clamped() {
        // Would panic inside broadcast::channel if 0 were passed through.
        let _ = Bus::new(0);
    }
}
