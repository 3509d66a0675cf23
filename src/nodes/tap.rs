//! # Channel tap.
//!
//! A [`Tap`] is an extra, independent endpoint that observes the raw
//! messages on a channel and hands them to a [`Sink`] without transforming
//! them. Attached alongside a pipeline on a publish-subscribe channel, it
//! receives the same published message, with no ordering guarantee relative
//! to its siblings.
//!
//! Publishes one [`EventKind::Tapped`] event per observed message.

use std::sync::Arc;

use async_trait::async_trait;

use crate::channels::Endpoint;
use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;

use super::pipeline::Sink;

/// Raw-payload observer endpoint.
pub struct Tap {
    name: Arc<str>,
    sink: Arc<dyn Sink>,
    bus: Bus,
}

impl Tap {
    /// Creates a new tap feeding the given sink.
    pub fn new(name: impl Into<Arc<str>>, bus: Bus, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
            bus,
        }
    }
}

#[async_trait]
impl Endpoint for Tap {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, msg: &Message) -> Result<(), FlowError> {
        self.bus.publish(
            FlowEvent::new(EventKind::Tapped)
                .with_node(self.name.clone())
                .with_payload(msg.payload().clone()),
        );
        self.sink.consume(msg).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::message::Payload;
    use crate::nodes::pipeline::SinkFn;

    #[tokio::test]
    async fn test_tap_passes_raw_payload() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let seen: Arc<Mutex<Vec<Payload>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let tap = Tap::new(
            "raw-tap",
            bus,
            SinkFn::arc("collect", move |msg: Message| {
                let seen = Arc::clone(&sink_seen);
                async move {
                    seen.lock().unwrap().push(msg.payload().clone());
                    Ok::<(), FlowError>(())
                }
            }),
        );

        tap.handle(&Message::int(-7)).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Payload::Int(-7)]);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::Tapped);
        assert_eq!(ev.node.as_deref(), Some("raw-tap"));
        assert_eq!(ev.payload, Some(Payload::Int(-7)));
    }
}
