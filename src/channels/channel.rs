//! # Channel trait shared by both delivery flavors.
//!
//! A [`Channel`] is a named conduit for messages with an attachable set of
//! endpoints. The two implementations differ only in their delivery rule:
//!
//! - [`DirectChannel`](crate::DirectChannel): point-to-point, each message
//!   reaches exactly one endpoint.
//! - [`FanoutChannel`](crate::FanoutChannel): publish-subscribe, each
//!   message reaches every endpoint attached at send time.
//!
//! ## Rules
//! - Delivery runs inline on the sending task; `send` completes when the
//!   downstream work for this message has completed.
//! - Endpoint sets are expected to be wired at startup; attachment is
//!   thread-safe but delivery iterates a snapshot taken at send time.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::FlowError;
use crate::message::Message;

use super::endpoint::EndpointRef;

/// Named conduit for messages.
#[async_trait]
pub trait Channel: Send + Sync + 'static {
    /// Returns the channel name.
    fn name(&self) -> &str;

    /// Attaches an endpoint. Intended for wiring at startup.
    fn attach(&self, endpoint: EndpointRef);

    /// Sends one message per the channel's delivery rule.
    async fn send(&self, msg: &Message) -> Result<(), FlowError>;
}

/// Shared channel handle.
pub type ChannelRef = Arc<dyn Channel>;

/// Clones the current endpoint set without holding the lock across awaits.
///
/// A poisoned lock is recovered rather than propagated; the endpoint list
/// itself cannot be left in a torn state by a panicking writer.
pub(crate) fn snapshot(endpoints: &RwLock<Vec<EndpointRef>>) -> Vec<EndpointRef> {
    match endpoints.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Appends an endpoint under the write lock, recovering a poisoned lock.
pub(crate) fn attach_to(endpoints: &RwLock<Vec<EndpointRef>>, endpoint: EndpointRef) {
    match endpoints.write() {
        Ok(mut guard) => guard.push(endpoint),
        Err(poisoned) => poisoned.into_inner().push(endpoint),
    }
}
