//! Message channels: the [`Channel`] trait, its point-to-point and
//! publish-subscribe implementations, and the [`Endpoint`] consumer trait.

mod channel;
mod direct;
mod endpoint;
mod fanout;

pub use channel::{Channel, ChannelRef};
pub use direct::DirectChannel;
pub use endpoint::{Endpoint, EndpointFn, EndpointRef};
pub use fanout::FanoutChannel;
