//! # Long-running task abstraction.
//!
//! A [`Task`] is an async, cancelable unit run by a [`Flow`](crate::Flow):
//! the timed producers implement it. A task receives a
//! [`CancellationToken`] and should check it at its safe points to exit
//! promptly during shutdown.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FlowError;

/// # Asynchronous, cancelable unit.
///
/// ## Example
/// ```rust
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use flowline::{FlowError, Task};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self, token: CancellationToken) -> Result<(), FlowError> {
///         if token.is_cancelled() {
///             return Ok(());
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion or cancellation.
    async fn run(&self, token: CancellationToken) -> Result<(), FlowError>;
}

/// Shared task handle.
pub type TaskRef = Arc<dyn Task>;
