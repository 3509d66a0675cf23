//! # Transform-handle pipeline.
//!
//! A [`Pipeline`] is a two-stage channel endpoint: a pure [`Transform`]
//! derives a new message from the delivered one, then a terminal [`Sink`]
//! consumes the derived message. Both stages have function-backed
//! implementations ([`TransformFn`], [`SinkFn`]) for closure-style wiring.
//!
//! ## Event flow
//! ```text
//! handle(msg)
//!   ├─► transform.apply(msg) ─► derived   → publish Transformed
//!   └─► sink.consume(&derived)            → publish Handled
//! ```
//!
//! ## Rules
//! - The delivered message is never modified; the transform returns a new
//!   message.
//! - The sink produces no further output; the pipeline is a flow terminus.
//! - A transform or sink error aborts this pipeline's handling of the
//!   message only; on a publish-subscribe channel the failure is confined
//!   to this endpoint.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channels::Endpoint;
use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;

/// Pure message transform: derives a new message from a delivered one.
pub trait Transform: Send + Sync + 'static {
    /// Returns a stable transform name for events and diagnostics.
    fn name(&self) -> &str;

    /// Derives a new message. Must not mutate shared state.
    fn apply(&self, msg: &Message) -> Result<Message, FlowError>;
}

/// Terminal, side-effecting consumer stage.
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Returns a stable sink name for events and diagnostics.
    fn name(&self) -> &str;

    /// Consumes one message; produces no further output.
    async fn consume(&self, msg: &Message) -> Result<(), FlowError>;
}

/// Function-backed [`Transform`].
#[derive(Debug)]
pub struct TransformFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TransformFn<F> {
    /// Creates a new function-backed transform.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the transform and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> Transform for TransformFn<F>
where
    F: Fn(&Message) -> Result<Message, FlowError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, msg: &Message) -> Result<Message, FlowError> {
        (self.f)(msg)
    }
}

/// Function-backed [`Sink`].
#[derive(Debug)]
pub struct SinkFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> SinkFn<F> {
    /// Creates a new function-backed sink.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the sink and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Sink for SinkFn<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), FlowError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn consume(&self, msg: &Message) -> Result<(), FlowError> {
        (self.f)(msg.clone()).await
    }
}

/// Two-stage endpoint: transform, then terminal handling.
///
/// One instance is attached per destination channel, parameterized only by
/// name, transform, and sink.
pub struct Pipeline {
    name: Arc<str>,
    transform: Arc<dyn Transform>,
    sink: Arc<dyn Sink>,
    bus: Bus,
}

impl Pipeline {
    /// Creates a new pipeline endpoint.
    pub fn new(
        name: impl Into<Arc<str>>,
        bus: Bus,
        transform: Arc<dyn Transform>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            name: name.into(),
            transform,
            sink,
            bus,
        }
    }
}

#[async_trait]
impl Endpoint for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, msg: &Message) -> Result<(), FlowError> {
        let derived = self.transform.apply(msg)?;
        self.bus.publish(
            FlowEvent::new(EventKind::Transformed)
                .with_node(self.transform.name().to_owned())
                .with_payload(derived.payload().clone()),
        );
        self.sink.consume(&derived).await?;
        self.bus.publish(
            FlowEvent::new(EventKind::Handled)
                .with_node(self.sink.name().to_owned())
                .with_payload(derived.payload().clone()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::message::Payload;

    fn number_label(msg: &Message) -> Result<Message, FlowError> {
        match msg.payload() {
            Payload::Int(v) => Ok(Message::text(format!("Number {v}"))),
            other => Err(FlowError::PayloadMismatch {
                expected: "int",
                found: other.kind(),
            }),
        }
    }

    struct RecordingSink {
        seen: Mutex<Vec<Payload>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Sink for RecordingSink {
        fn name(&self) -> &str {
            "recording-sink"
        }

        async fn consume(&self, msg: &Message) -> Result<(), FlowError> {
            self.seen.lock().unwrap().push(msg.payload().clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_transform_then_handle() {
        let bus = Bus::new(32);
        let mut rx = bus.subscribe();
        let sink = RecordingSink::new();
        let pipeline = Pipeline::new(
            "odd-flow",
            bus,
            TransformFn::arc("odd-label", number_label),
            sink.clone(),
        );

        pipeline.handle(&Message::int(-7)).await.unwrap();

        assert_eq!(
            *sink.seen.lock().unwrap(),
            vec![Payload::Text("Number -7".into())]
        );

        let transformed = rx.recv().await.unwrap();
        assert_eq!(transformed.kind, EventKind::Transformed);
        assert_eq!(transformed.node.as_deref(), Some("odd-label"));
        assert_eq!(transformed.payload, Some(Payload::Text("Number -7".into())));

        let handled = rx.recv().await.unwrap();
        assert_eq!(handled.kind, EventKind::Handled);
        assert_eq!(handled.node.as_deref(), Some("recording-sink"));
    }

    #[tokio::test]
    async fn test_transform_error_skips_sink() {
        let bus = Bus::new(16);
        let sink = RecordingSink::new();
        let pipeline = Pipeline::new(
            "odd-flow",
            bus,
            TransformFn::arc("odd-label", number_label),
            sink.clone(),
        );

        let err = pipeline.handle(&Message::text("oops")).await.unwrap_err();
        assert!(matches!(err, FlowError::PayloadMismatch { .. }));
        assert!(sink.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_original_message_is_untouched() {
        let bus = Bus::new(16);
        let pipeline = Pipeline::new(
            "even-flow",
            bus,
            TransformFn::arc("even-label", number_label),
            SinkFn::arc("noop", |_msg: Message| async { Ok::<(), FlowError>(()) }),
        );

        let original = Message::int(4);
        pipeline.handle(&original).await.unwrap();
        assert_eq!(original.as_int(), Some(4));
    }
}
