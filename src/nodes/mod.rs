//! Flow nodes: content-based routing, transform-handle pipelines, and
//! channel taps.

mod pipeline;
mod router;
mod tap;

pub use pipeline::{Pipeline, Sink, SinkFn, Transform, TransformFn};
pub use router::{KeyFn, Router, parity_key};
pub use tap::Tap;
