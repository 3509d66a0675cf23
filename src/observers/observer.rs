//! # Flow event observer trait.
//!
//! [`Observe`] is the extension point for plugging custom event consumers
//! (logging, metrics, assertions in tests) into a [`Flow`](crate::Flow).
//!
//! Each observer gets:
//! - a **dedicated worker task** (runs independently of publishers),
//! - a **per-observer bounded queue**
//!   (capacity via [`Observe::queue_capacity`]),
//! - **panic isolation** (a panicking observer is reported, not fatal).
//!
//! ## Rules
//! - Events are processed sequentially (FIFO) per observer.
//! - A slow observer only affects its own queue; on overflow the new event
//!   is dropped for this observer only.
//! - Observers never block publishers or each other.

use async_trait::async_trait;

use crate::events::FlowEvent;

/// Flow event consumer for observability.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, never in the publisher context.
    async fn on_event(&self, event: &FlowEvent);

    /// Returns the observer name used in diagnostics.
    ///
    /// Prefer short names ("log", "metrics"). The default uses
    /// `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// Clamped to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
