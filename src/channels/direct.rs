//! # Point-to-point channel.
//!
//! [`DirectChannel`] delivers each message to exactly one of its attached
//! endpoints. With several endpoints attached, delivery rotates round-robin
//! over the snapshot; the intended use is a single competing consumer, where
//! the policy degenerates to trivial single delivery.
//!
//! ## Rules
//! - Delivery is inline: `send` awaits the chosen endpoint's `handle` and
//!   propagates its error to the sender.
//! - A send with no endpoint attached discards the message and publishes
//!   [`EventKind::DeliveryDropped`]; it is not an error.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;

use super::channel::{self, Channel};
use super::endpoint::EndpointRef;

/// Point-to-point channel: one message, one consumer.
pub struct DirectChannel {
    name: Arc<str>,
    endpoints: RwLock<Vec<EndpointRef>>,
    cursor: AtomicUsize,
    bus: Bus,
}

impl DirectChannel {
    /// Creates a new channel and returns it as a shared handle.
    pub fn new(name: impl Into<Arc<str>>, bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            endpoints: RwLock::new(Vec::new()),
            cursor: AtomicUsize::new(0),
            bus,
        })
    }
}

#[async_trait]
impl Channel for DirectChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, endpoint: EndpointRef) {
        channel::attach_to(&self.endpoints, endpoint);
    }

    async fn send(&self, msg: &Message) -> Result<(), FlowError> {
        let endpoints = channel::snapshot(&self.endpoints);
        if endpoints.is_empty() {
            self.bus.publish(
                FlowEvent::new(EventKind::DeliveryDropped)
                    .with_node(self.name.clone())
                    .with_payload(msg.payload().clone()),
            );
            return Ok(());
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % endpoints.len();
        endpoints[idx].handle(msg).await
    }
}
