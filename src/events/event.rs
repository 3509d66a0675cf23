//! # Flow events emitted by stages and the runtime.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Stage events**: one per stage per message (source, gateway, route,
//!   transform, handle, tap)
//! - **Fault events**: dropped deliveries, failing endpoints, failing
//!   producer ticks
//! - **Lifecycle events**: shutdown progress
//!
//! The [`FlowEvent`] struct carries metadata such as the emitting node's
//! name, a snapshot of the message payload, and a free-form detail string.
//!
//! ## Ordering
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically across all publishers. Use `seq` to restore order when
//! events are observed out of band.
//!
//! ## Example
//! ```rust
//! use flowline::{EventKind, FlowEvent, Payload};
//!
//! let ev = FlowEvent::new(EventKind::Routed)
//!     .with_node("parity-router")
//!     .with_payload(Payload::Int(-7))
//!     .with_detail("odd");
//!
//! assert_eq!(ev.kind, EventKind::Routed);
//! assert_eq!(ev.node.as_deref(), Some("parity-router"));
//! assert_eq!(ev.detail.as_deref(), Some("odd"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::message::Payload;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of flow events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Stage events ===
    /// A periodic source produced a value.
    ///
    /// Sets: `node` (source name), `payload` (produced value).
    SourceEmitted,

    /// A value entered the flow through a gateway.
    ///
    /// Sets: `node` (gateway name), `payload` (injected value).
    GatewayInjected,

    /// A router picked a destination channel for a message.
    ///
    /// Sets: `node` (router name), `payload`, `detail` (destination
    /// channel name).
    Routed,

    /// A transform stage produced a derived message.
    ///
    /// Sets: `node` (transform name), `payload` (derived value).
    Transformed,

    /// A terminal sink consumed a message.
    ///
    /// Sets: `node` (sink name), `payload` (consumed value).
    Handled,

    /// A tap observed a message on a channel.
    ///
    /// Sets: `node` (tap name), `payload` (raw value).
    Tapped,

    // === Fault events ===
    /// A point-to-point send found no attached endpoint; the message was
    /// discarded.
    ///
    /// Sets: `node` (channel name), `payload` (discarded value).
    DeliveryDropped,

    /// An endpoint on a publish-subscribe channel failed or panicked;
    /// delivery to the remaining endpoints continued.
    ///
    /// Sets: `node` (endpoint name), `payload`, `detail` (failure text).
    EndpointFailed,

    /// A producer task failed; its schedule continues on the next tick.
    ///
    /// Sets: `node` (producer name), `detail` (failure text).
    ProducerFailed,

    // === Lifecycle events ===
    /// Shutdown requested (OS signal or programmatic).
    ShutdownRequested,

    /// All tasks stopped within the configured grace period.
    AllStopped,

    /// Grace period exceeded; some tasks did not stop in time.
    GraceExceeded,
}

/// Flow event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct FlowEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the emitting node (source, channel, router, endpoint).
    pub node: Option<Arc<str>>,
    /// Snapshot of the message payload at this stage.
    pub payload: Option<Payload>,
    /// Free-form detail (destination channel, failure text).
    pub detail: Option<Arc<str>>,
}

impl FlowEvent {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            node: None,
            payload: None,
            detail: None,
        }
    }

    /// Attaches the emitting node's name.
    #[inline]
    pub fn with_node(mut self, node: impl Into<Arc<str>>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Attaches a payload snapshot.
    #[inline]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attaches a detail string.
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
