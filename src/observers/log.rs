//! # Logging observer.
//!
//! [`LogWriter`] renders every flow event as a structured `tracing` line.
//! Stage events log at `info`, faults at `warn`. Install a
//! `tracing-subscriber` in the binary to see the output:
//!
//! ```text
//! INFO source emitted node="sequence-source" payload=3
//! INFO routed node="parity-router" payload=3 destination="odd"
//! INFO transformed node="odd-label" payload="Number 3"
//! INFO handled node="odd-handler" payload="Number 3"
//! WARN endpoint failed node="raw-tap" reason="handler failed: boom"
//! ```

use async_trait::async_trait;

use crate::events::{EventKind, FlowEvent};

use super::observer::Observe;

/// Structured-logging observer.
pub struct LogWriter;

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &FlowEvent) {
        let node = e.node.as_deref().unwrap_or("-");
        let payload = e.payload.as_ref().map(|p| p.to_string()).unwrap_or_default();
        let detail = e.detail.as_deref().unwrap_or("");
        match e.kind {
            EventKind::SourceEmitted => {
                tracing::info!(seq = e.seq, node, payload = %payload, "source emitted");
            }
            EventKind::GatewayInjected => {
                tracing::info!(seq = e.seq, node, payload = %payload, "gateway injected");
            }
            EventKind::Routed => {
                tracing::info!(seq = e.seq, node, payload = %payload, destination = detail, "routed");
            }
            EventKind::Transformed => {
                tracing::info!(seq = e.seq, node, payload = %payload, "transformed");
            }
            EventKind::Handled => {
                tracing::info!(seq = e.seq, node, payload = %payload, "handled");
            }
            EventKind::Tapped => {
                tracing::info!(seq = e.seq, node, payload = %payload, "tapped");
            }
            EventKind::DeliveryDropped => {
                tracing::warn!(seq = e.seq, node, payload = %payload, "delivery dropped: no consumer");
            }
            EventKind::EndpointFailed => {
                tracing::warn!(seq = e.seq, node, payload = %payload, reason = detail, "endpoint failed");
            }
            EventKind::ProducerFailed => {
                tracing::warn!(seq = e.seq, node, reason = detail, "producer tick failed");
            }
            EventKind::ShutdownRequested => {
                tracing::info!(seq = e.seq, "shutdown requested");
            }
            EventKind::AllStopped => {
                tracing::info!(seq = e.seq, "all tasks stopped");
            }
            EventKind::GraceExceeded => {
                tracing::warn!(seq = e.seq, "shutdown grace exceeded");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
