//! # flowline
//!
//! **flowline** is a lightweight in-process message-flow library for Rust.
//!
//! It provides the building blocks of a small integration pipeline: named
//! channels with point-to-point or publish-subscribe delivery, timed
//! producers, content-based routing, and transform/handle pipelines, plus
//! an event bus for per-stage observability.
//!
//! ## Architecture
//! ```text
//!  ┌─────────────────┐          ┌─────────────────┐
//!  │ SequenceSource  │          │ RandomInjector  │
//!  │ (every 100ms:   │          │ (every 1000ms:  │
//!  │  n = counter++) │          │  v = -rand)     │
//!  └────────┬────────┘          └────────┬────────┘
//!           │ send                       │ Gateway::send_number
//!           ▼                            ▼
//!  ┌─────────────────────────────────────────────┐
//!  │        DirectChannel "numbers"              │   (point-to-point)
//!  └──────────────────────┬──────────────────────┘
//!                         ▼
//!               ┌───────────────────┐
//!               │      Router       │   key = parity of payload
//!               └─────┬───────┬─────┘
//!            "even"   │       │   "odd"
//!                     ▼       ▼
//!     ┌───────────────────┐ ┌───────────────────┐
//!     │ FanoutChannel     │ │ FanoutChannel     │   (publish-subscribe)
//!     │   ├─ Pipeline     │ │   ├─ Pipeline     │
//!     │                   │ │   └─ Tap          │
//!     └───────────────────┘ └───────────────────┘
//!
//!  every stage ── publish(FlowEvent) ──► Bus ──► ObserverSet ──► LogWriter, ...
//! ```
//!
//! Delivery is synchronous end-to-end: a producer's tick (or a gateway
//! call) completes only after the router, the destination channel, and
//! every endpoint on it have processed the message. The two producers run
//! on independent timers with no coordination, so the router sees messages
//! in wall-clock arrival order.
//!
//! ## Features
//! | Area           | Description                                              | Key types                                   |
//! |----------------|----------------------------------------------------------|---------------------------------------------|
//! | **Channels**   | Point-to-point and publish-subscribe delivery.           | [`DirectChannel`], [`FanoutChannel`]        |
//! | **Endpoints**  | Async message consumers, closure-friendly.               | [`Endpoint`], [`EndpointFn`]                |
//! | **Nodes**      | Content-based routing, transform/handle, taps.           | [`Router`], [`Pipeline`], [`Tap`]           |
//! | **Sources**    | Fixed-rate producers and the injection gateway.          | [`SequenceSource`], [`RandomInjector`], [`Gateway`] |
//! | **Observability** | Per-stage events with isolated observer fan-out.      | [`FlowEvent`], [`Observe`], [`LogWriter`]   |
//! | **Runtime**    | Task spawning and graceful shutdown.                     | [`Flow`], [`Task`], [`FlowConfig`]          |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use flowline::{
//!     Channel, DirectChannel, FanoutChannel, Flow, FlowConfig, FlowError, Gateway,
//!     LogWriter, Message, Payload, Pipeline, RandomInjector, Router, SequenceSource,
//!     SinkFn, Tap, TaskRef, TransformFn, parity_key,
//! };
//!
//! fn number_label(msg: &Message) -> Result<Message, FlowError> {
//!     match msg.payload() {
//!         Payload::Int(v) => Ok(Message::text(format!("Number {v}"))),
//!         other => Err(FlowError::PayloadMismatch {
//!             expected: "int",
//!             found: other.kind(),
//!         }),
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = FlowConfig::default();
//!     let flow = Flow::new(cfg.clone(), vec![Arc::new(LogWriter)]);
//!     let bus = flow.bus();
//!
//!     let numbers = DirectChannel::new("numbers", bus.clone());
//!     let even = FanoutChannel::new("even", bus.clone());
//!     let odd = FanoutChannel::new("odd", bus.clone());
//!
//!     even.attach(Arc::new(Pipeline::new(
//!         "even-flow",
//!         bus.clone(),
//!         TransformFn::arc("even-label", number_label),
//!         SinkFn::arc("even-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
//!     )));
//!     odd.attach(Arc::new(Pipeline::new(
//!         "odd-flow",
//!         bus.clone(),
//!         TransformFn::arc("odd-label", number_label),
//!         SinkFn::arc("odd-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
//!     )));
//!     odd.attach(Arc::new(Tap::new(
//!         "raw-tap",
//!         bus.clone(),
//!         SinkFn::arc("raw-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
//!     )));
//!
//!     let router = Router::new("parity-router", bus.clone(), parity_key)
//!         .route("even", even.clone())
//!         .route("odd", odd.clone());
//!     numbers.attach(Arc::new(router));
//!
//!     let gateway = Gateway::new(numbers.clone(), bus.clone());
//!     let source = SequenceSource::new(numbers.clone(), cfg.poll_interval, bus.clone());
//!     let injector = RandomInjector::new(
//!         gateway,
//!         cfg.inject_interval,
//!         cfg.random_bound_clamped(),
//!         bus,
//!     );
//!
//!     flow.run(vec![Arc::new(source) as TaskRef, Arc::new(injector)]).await?;
//!     Ok(())
//! }
//! ```

mod channels;
mod config;
mod error;
mod events;
mod message;
mod nodes;
mod observers;
mod runtime;
mod sources;

// ---- Public re-exports ----

pub use channels::{Channel, ChannelRef, DirectChannel, Endpoint, EndpointFn, EndpointRef, FanoutChannel};
pub use config::FlowConfig;
pub use error::{FlowError, RuntimeError};
pub use events::{Bus, EventKind, FlowEvent};
pub use message::{Message, Payload};
pub use nodes::{KeyFn, Pipeline, Router, Sink, SinkFn, Tap, Transform, TransformFn, parity_key};
pub use observers::{LogWriter, Observe, ObserverSet};
pub use runtime::{Flow, Task, TaskRef};
pub use sources::{Gateway, RandomInjector, SequenceSource};
