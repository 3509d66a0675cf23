//! # Content-based router.
//!
//! A [`Router`] consumes messages from one channel and forwards each one,
//! unchanged, to the destination channel named by a pure key function
//! applied to the payload. Destinations are registered at construction via
//! the builder-style [`Router::route`] and never change afterwards.
//!
//! ## Rules
//! - The message is forwarded as-is; routing never rewrites a payload.
//! - Exactly one [`EventKind::Routed`] event is published per message, with
//!   the destination channel name as detail.
//! - A key with no registered destination is [`FlowError::UnknownRoute`].
//! - The router processes messages in delivery order: it is attached as the
//!   single consumer of a point-to-point channel and runs inline on the
//!   sending task.
//!
//! The bundled [`parity_key`] classifies integer payloads by parity,
//! independent of sign: `v % 2 == 0` picks `"even"`, everything else picks
//! `"odd"` (for negative odd values the remainder is nonzero, which is all
//! the test needs).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channels::{ChannelRef, Endpoint};
use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::{Message, Payload};

/// Routing key function: pure decision from message payload to route key.
pub type KeyFn = dyn Fn(&Message) -> Result<&'static str, FlowError> + Send + Sync;

/// Content-based router over a fixed destination map.
pub struct Router {
    name: Arc<str>,
    key: Box<KeyFn>,
    routes: HashMap<&'static str, ChannelRef>,
    bus: Bus,
}

impl Router {
    /// Creates a router with the given key function and no destinations.
    pub fn new(
        name: impl Into<Arc<str>>,
        bus: Bus,
        key: impl Fn(&Message) -> Result<&'static str, FlowError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            key: Box::new(key),
            routes: HashMap::new(),
            bus,
        }
    }

    /// Registers a destination channel under a route key.
    pub fn route(mut self, key: &'static str, channel: ChannelRef) -> Self {
        self.routes.insert(key, channel);
        self
    }
}

#[async_trait]
impl Endpoint for Router {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, msg: &Message) -> Result<(), FlowError> {
        let key = (self.key)(msg)?;
        let dest = self
            .routes
            .get(key)
            .ok_or(FlowError::UnknownRoute { key })?;
        self.bus.publish(
            FlowEvent::new(EventKind::Routed)
                .with_node(self.name.clone())
                .with_payload(msg.payload().clone())
                .with_detail(dest.name()),
        );
        dest.send(msg).await
    }
}

/// Parity route decision: `"even"` for even integers, `"odd"` otherwise.
///
/// Sign does not affect classification. A non-integer payload is a contract
/// violation reported as [`FlowError::PayloadMismatch`].
pub fn parity_key(msg: &Message) -> Result<&'static str, FlowError> {
    match msg.payload() {
        Payload::Int(v) => Ok(if v % 2 == 0 { "even" } else { "odd" }),
        other => Err(FlowError::PayloadMismatch {
            expected: "int",
            found: other.kind(),
        }),
    }
}
