//! # Scheduled random injector.
//!
//! [`RandomInjector`] runs on its own fixed-rate timer, independent of any
//! other producer feeding the same channel. Each tick draws a pseudo-random
//! integer in `[0, bound)`, negates it, and injects it through a
//! [`Gateway`].
//!
//! Two uncoordinated timers feeding one point-to-point channel means the
//! router sees wall-clock arrival order, not a merge by any logical
//! sequence. That interleaving is intended.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::FlowError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::runtime::Task;
use crate::sources::Gateway;

/// Timed producer of negated random integers.
pub struct RandomInjector {
    gateway: Gateway,
    interval: Duration,
    bound: i64,
    bus: Bus,
}

impl RandomInjector {
    /// Creates an injector sending through `gateway` every `interval`.
    ///
    /// `bound` is exclusive and clamped to a minimum of 1; emitted values
    /// fall in `[-(bound - 1), 0]`.
    pub fn new(gateway: Gateway, interval: Duration, bound: i64, bus: Bus) -> Self {
        Self {
            gateway,
            interval,
            bound: bound.max(1),
            bus,
        }
    }
}

#[async_trait]
impl Task for RandomInjector {
    fn name(&self) -> &str {
        "random-injector"
    }

    async fn run(&self, token: CancellationToken) -> Result<(), FlowError> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        loop {
            tokio::select! {
                _ = token.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }

            let value = {
                let mut rng = rand::rng();
                -rng.random_range(0..self.bound)
            };
            if let Err(e) = self.gateway.send_number(value).await {
                self.bus.publish(
                    FlowEvent::new(EventKind::ProducerFailed)
                        .with_node(self.name())
                        .with_detail(e.to_string()),
                );
            }
        }
    }
}
