//! Error types used by the flowline runtime and flow stages.
//!
//! Two enums, split by origin:
//!
//! - [`RuntimeError`]: errors raised by the orchestration runtime itself.
//! - [`FlowError`]: errors raised while a message moves through the flow.
//!
//! There is no retry or dead-letter machinery: a failing endpoint on a
//! publish-subscribe channel is isolated and reported, a failing tick of a
//! producer is reported and the schedule continues.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the flowline runtime.
///
/// These represent failures of the runtime itself rather than of any single
/// message, such as a shutdown sequence exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some tasks remained stuck.
    #[error("shutdown grace {grace:?} exceeded; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

/// # Errors produced while processing a message.
///
/// Raised by routers, transforms, sinks, and endpoints. On a point-to-point
/// channel these propagate to the sender; on a publish-subscribe channel
/// they are confined to the failing endpoint.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FlowError {
    /// A router computed a key with no registered destination channel.
    #[error("no destination registered for route key {key:?}")]
    UnknownRoute {
        /// The computed routing key.
        key: &'static str,
    },

    /// A stage received a payload shape it does not accept.
    #[error("expected {expected} payload, got {found}")]
    PayloadMismatch {
        /// Payload shape the stage requires.
        expected: &'static str,
        /// Payload shape that was actually delivered.
        found: &'static str,
    },

    /// A handler (endpoint or sink) failed while consuming a message.
    #[error("handler failed: {reason}")]
    Handler {
        /// The underlying failure message.
        reason: String,
    },
}

impl FlowError {
    /// Shorthand for [`FlowError::Handler`].
    pub fn handler(reason: impl Into<String>) -> Self {
        FlowError::Handler {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = FlowError::UnknownRoute { key: "prime" };
        assert_eq!(
            e.to_string(),
            "no destination registered for route key \"prime\""
        );

        let e = FlowError::PayloadMismatch {
            expected: "int",
            found: "text",
        };
        assert_eq!(e.to_string(), "expected int payload, got text");

        let e = FlowError::handler("boom");
        assert_eq!(e.to_string(), "handler failed: boom");
    }

    #[test]
    fn test_grace_exceeded_message() {
        let e = RuntimeError::GraceExceeded {
            grace: Duration::from_secs(5),
        };
        assert!(e.to_string().contains("5s"));
    }
}
