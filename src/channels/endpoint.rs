//! # Message endpoint trait and function-backed implementation.
//!
//! An [`Endpoint`] is a named, asynchronous message consumer. Channels hold
//! endpoints as [`EndpointRef`] handles and invoke them per delivered
//! message. [`EndpointFn`] wraps a closure `F: Fn(Message) -> Fut`,
//! producing a fresh future per delivery, so no shared mutable state is
//! needed; if an endpoint wants state, it holds an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use flowline::{EndpointFn, EndpointRef, FlowError, Message};
//!
//! let ep: EndpointRef = EndpointFn::arc("printer", |msg: Message| async move {
//!     println!("{}", msg.payload());
//!     Ok::<(), FlowError>(())
//! });
//! assert_eq!(ep.name(), "printer");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FlowError;
use crate::message::Message;

/// # Named, asynchronous message consumer.
///
/// An `Endpoint` has a stable [`name`](Endpoint::name) used in events and
/// diagnostics, and an async [`handle`](Endpoint::handle) invoked once per
/// delivered message.
///
/// Delivery runs inline on the sending task. Whether an `Err` returned from
/// `handle` reaches the sender depends on the channel flavor: point-to-point
/// channels propagate it, publish-subscribe channels confine it to this
/// endpoint.
#[async_trait]
pub trait Endpoint: Send + Sync + 'static {
    /// Returns a stable, human-readable endpoint name.
    fn name(&self) -> &str;

    /// Consumes one delivered message.
    async fn handle(&self, msg: &Message) -> Result<(), FlowError>;
}

/// Shared endpoint handle.
pub type EndpointRef = Arc<dyn Endpoint>;

/// Function-backed endpoint implementation.
///
/// Wraps a closure that creates a new future per delivered message.
#[derive(Debug)]
pub struct EndpointFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> EndpointFn<F> {
    /// Creates a new function-backed endpoint.
    ///
    /// Prefer [`EndpointFn::arc`] when you immediately need an
    /// [`EndpointRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the endpoint and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Endpoint for EndpointFn<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), FlowError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, msg: &Message) -> Result<(), FlowError> {
        (self.f)(msg.clone()).await
    }
}
