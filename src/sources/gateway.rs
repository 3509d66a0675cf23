//! # Synchronous injection gateway.
//!
//! [`Gateway`] is the external entry point into a flow: callers hand it a
//! value and it sends the wrapped message into the flow's intermediate
//! channel. The call completes only after the downstream work for that
//! message has completed, so a message injected here is indistinguishable,
//! from the router's point of view, from one produced by a timed source.

use crate::channels::ChannelRef;
use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;

/// External entry point for injecting numbers into a flow.
#[derive(Clone)]
pub struct Gateway {
    channel: ChannelRef,
    bus: Bus,
}

impl Gateway {
    /// Creates a gateway sending into the given channel.
    pub fn new(channel: ChannelRef, bus: Bus) -> Self {
        Self { channel, bus }
    }

    /// Sends `value` into the flow and awaits its downstream processing.
    ///
    /// Publishes one [`EventKind::GatewayInjected`] event per call.
    pub async fn send_number(&self, value: i64) -> Result<(), FlowError> {
        let msg = Message::int(value);
        self.bus.publish(
            FlowEvent::new(EventKind::GatewayInjected)
                .with_node("gateway")
                .with_payload(msg.payload().clone()),
        );
        self.channel.send(&msg).await
    }
}
