//! # Fixed-rate sequence producer.
//!
//! [`SequenceSource`] polls on a fixed interval, atomically
//! fetch-and-increments a shared counter, and sends the obtained integer to
//! its output channel.
//!
//! ## Rules
//! - The counter is mutated only by this source; one increment per tick.
//! - Fixed-rate scheduling: the timer aims for absolute tick boundaries. If
//!   a tick's downstream work overruns the interval, the missed ticks fire
//!   back-to-back rather than being dropped
//!   ([`MissedTickBehavior::Burst`]).
//! - A failed send is reported as [`EventKind::ProducerFailed`] and the
//!   schedule continues; sending into a channel with no consumer is a
//!   reported no-op, not a failure.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::channels::ChannelRef;
use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::message::Message;
use crate::runtime::Task;

/// Polling producer of consecutive integers.
pub struct SequenceSource {
    channel: ChannelRef,
    counter: AtomicI64,
    interval: Duration,
    bus: Bus,
}

impl SequenceSource {
    /// Creates a source that publishes to `channel` every `interval`,
    /// starting the sequence at zero.
    pub fn new(channel: ChannelRef, interval: Duration, bus: Bus) -> Self {
        Self {
            channel,
            counter: AtomicI64::new(0),
            interval,
            bus,
        }
    }
}

#[async_trait]
impl Task for SequenceSource {
    fn name(&self) -> &str {
        "sequence-source"
    }

    async fn run(&self, token: CancellationToken) -> Result<(), FlowError> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        loop {
            tokio::select! {
                _ = token.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }

            let n = self.counter.fetch_add(1, Ordering::Relaxed);
            let msg = Message::int(n);
            self.bus.publish(
                FlowEvent::new(EventKind::SourceEmitted)
                    .with_node(self.name())
                    .with_payload(msg.payload().clone()),
            );
            if let Err(e) = self.channel.send(&msg).await {
                self.bus.publish(
                    FlowEvent::new(EventKind::ProducerFailed)
                        .with_node(self.name())
                        .with_detail(e.to_string()),
                );
            }
        }
    }
}
