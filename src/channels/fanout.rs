//! # Publish-subscribe channel.
//!
//! [`FanoutChannel`] delivers each message to every endpoint attached at
//! send time, iterating a snapshot of the endpoint set.
//!
//! ## Rules
//! - Each endpoint invocation is isolated: an `Err` or a panic is reported
//!   as [`EventKind::EndpointFailed`] (plus a `tracing` warning) and neither
//!   stops delivery to the remaining endpoints nor reaches the sender.
//! - Endpoints run sequentially on the sending task, in attachment order;
//!   they must not assume anything about their position in that order.
//! - No delivery to endpoints attached after the snapshot was taken.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::FutureExt;

use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;

use super::channel::{self, Channel};
use super::endpoint::EndpointRef;

/// Publish-subscribe channel: one message, every attached endpoint.
pub struct FanoutChannel {
    name: Arc<str>,
    endpoints: RwLock<Vec<EndpointRef>>,
    bus: Bus,
}

impl FanoutChannel {
    /// Creates a new channel and returns it as a shared handle.
    pub fn new(name: impl Into<Arc<str>>, bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            endpoints: RwLock::new(Vec::new()),
            bus,
        })
    }

    fn report_failure(&self, endpoint: &str, msg: &Message, reason: String) {
        tracing::warn!(
            channel = %self.name,
            endpoint,
            reason = %reason,
            "endpoint failed; continuing fan-out"
        );
        self.bus.publish(
            FlowEvent::new(EventKind::EndpointFailed)
                .with_node(endpoint.to_owned())
                .with_payload(msg.payload().clone())
                .with_detail(reason),
        );
    }
}

#[async_trait]
impl Channel for FanoutChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, endpoint: EndpointRef) {
        channel::attach_to(&self.endpoints, endpoint);
    }

    async fn send(&self, msg: &Message) -> Result<(), FlowError> {
        for endpoint in channel::snapshot(&self.endpoints) {
            let fut = endpoint.handle(msg);
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => self.report_failure(endpoint.name(), msg, e.to_string()),
                Err(panic) => self.report_failure(endpoint.name(), msg, panic_detail(panic)),
            }
        }
        Ok(())
    }
}

fn panic_detail(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "endpoint panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::channels::endpoint::{Endpoint, EndpointFn};
    use crate::message::Payload;

    struct Recorder {
        label: &'static str,
        seen: Mutex<Vec<Payload>>,
    }

    impl Recorder {
        fn new(label: &'static str) -> Arc<Self> {
            Arc::new(Self {
                label,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Payload> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Endpoint for Recorder {
        fn name(&self) -> &str {
            self.label
        }

        async fn handle(&self, msg: &Message) -> Result<(), FlowError> {
            self.seen.lock().unwrap().push(msg.payload().clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_every_endpoint_sees_the_message_once() {
        let bus = Bus::new(16);
        let ch = FanoutChannel::new("odd", bus);
        let a = Recorder::new("pipeline");
        let b = Recorder::new("tap");
        ch.attach(a.clone());
        ch.attach(b.clone());

        ch.send(&Message::int(42)).await.unwrap();

        assert_eq!(a.seen(), vec![Payload::Int(42)]);
        assert_eq!(b.seen(), vec![Payload::Int(42)]);
    }

    struct Panicking;

    impl Panicking {
        fn new() -> Arc<Self> {
            Arc::new(Self)
        }
    }

    #[async_trait]
    impl Endpoint for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn handle(&self, _msg: &Message) -> Result<(), FlowError> {
            panic!("kaboom");
        }
    }

    #[tokio::test]
    async fn test_failure_and_panic_are_isolated() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let ch = FanoutChannel::new("odd", bus);

        ch.attach(EndpointFn::arc("failing", |_msg: Message| async {
            Err::<(), FlowError>(FlowError::handler("boom"))
        }));
        ch.attach(Panicking::new());
        let rec = Recorder::new("survivor");
        ch.attach(rec.clone());

        // Sender is unaffected by the two misbehaving endpoints.
        ch.send(&Message::int(5)).await.unwrap();
        assert_eq!(rec.seen(), vec![Payload::Int(5)]);

        let first = rx.recv().await.expect("failure event");
        assert_eq!(first.kind, EventKind::EndpointFailed);
        assert_eq!(first.node.as_deref(), Some("failing"));

        let second = rx.recv().await.expect("panic event");
        assert_eq!(second.kind, EventKind::EndpointFailed);
        assert_eq!(second.node.as_deref(), Some("panicking"));
        assert_eq!(second.detail.as_deref(), Some("kaboom"));
    }

    #[tokio::test]
    async fn test_no_endpoints_is_a_noop() {
        let bus = Bus::new(16);
        let ch = FanoutChannel::new("even", bus);
        ch.send(&Message::int(2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_payload_identical_across_endpoints() {
        let bus = Bus::new(16);
        let ch = FanoutChannel::new("odd", bus);
        let a = Recorder::new("a");
        let b = Recorder::new("b");
        ch.attach(a.clone());
        ch.attach(b.clone());

        ch.send(&Message::int(-13)).await.unwrap();
        assert_eq!(a.seen(), b.seen());
    }
}
