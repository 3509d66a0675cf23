//! # Flow configuration.
//!
//! [`FlowConfig`] centralizes the recognized knobs of a flow: the two
//! producer intervals, the injector's random bound, the event-bus capacity,
//! and the shutdown grace window.
//!
//! All fields are public for flexibility; prefer the clamping accessors
//! over re-checking sentinel values at use sites.

use std::time::Duration;

/// Runtime configuration for a flow.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// Interval between sequence-source ticks.
    pub poll_interval: Duration,

    /// Interval between random-injector ticks.
    pub inject_interval: Duration,

    /// Exclusive upper bound for the injector's random draw; emitted values
    /// fall in `[-(random_bound - 1), 0]`.
    pub random_bound: i64,

    /// Capacity of the event bus ring buffer.
    ///
    /// Observers that lag behind more than this many events skip the
    /// oldest ones. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Maximum time to wait for tasks to stop during shutdown before
    /// giving up with [`RuntimeError::GraceExceeded`](crate::RuntimeError).
    pub grace: Duration,
}

impl FlowConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the random bound clamped to a minimum of 1.
    #[inline]
    pub fn random_bound_clamped(&self) -> i64 {
        self.random_bound.max(1)
    }
}

impl Default for FlowConfig {
    /// Default configuration:
    ///
    /// - `poll_interval = 100ms`
    /// - `inject_interval = 1000ms`
    /// - `random_bound = 100` (injected values in `[-99, 0]`)
    /// - `bus_capacity = 1024`
    /// - `grace = 30s`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            inject_interval: Duration::from_millis(1000),
            random_bound: 100,
            bus_capacity: 1024,
            grace: Duration::from_secs(30),
        }
    }
}
