//! # Flow runtime: task spawning, event delivery, graceful shutdown.
//!
//! [`Flow`] owns the event [`Bus`], an [`ObserverSet`], and the root
//! [`CancellationToken`]. Channels, routers, and pipelines are wired by the
//! caller against [`Flow::bus`]; [`Flow::run`] then drives the timed tasks
//! until shutdown.
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   Vec<TaskRef>  ──►  one tokio task each (JoinSet, child tokens)
//!
//! Event flow:
//!   stages ── publish(FlowEvent) ──► Bus ──► observer listener ──► ObserverSet::emit
//!                                                        ┌─────────┼─────────┐
//!                                                        ▼         ▼         ▼
//!                                                    [queue O1] [queue O2] [queue ON]
//!                                                        ▼         ▼         ▼
//!                                                    on_event() per observer
//!
//! Shutdown path (signal or Flow::shutdown()):
//!   publish ShutdownRequested
//!   cancel root token → propagates to child tokens
//!   wait up to config.grace:
//!     ├─ all joined    → publish AllStopped
//!     └─ still running → publish GraceExceeded, Err(RuntimeError::GraceExceeded)
//! ```

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::FlowConfig;
use crate::error::RuntimeError;
use crate::events::{Bus, EventKind, FlowEvent};
use crate::observers::{Observe, ObserverSet};

use super::shutdown;
use super::task::TaskRef;

/// Coordinates timed tasks, event delivery, and graceful shutdown.
pub struct Flow {
    cfg: FlowConfig,
    bus: Bus,
    observers: Arc<ObserverSet>,
    token: CancellationToken,
}

impl Flow {
    /// Creates a new flow runtime with the given config and observers.
    ///
    /// Must be called from within a tokio runtime (observer workers are
    /// spawned here).
    pub fn new(cfg: FlowConfig, observers: Vec<Arc<dyn Observe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let observers = Arc::new(ObserverSet::new(observers));
        Self {
            cfg,
            bus,
            observers,
            token: CancellationToken::new(),
        }
    }

    /// Returns a clone of the event bus for wiring channels and nodes.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Returns the runtime configuration.
    pub fn config(&self) -> &FlowConfig {
        &self.cfg
    }

    /// Requests a programmatic shutdown of a running flow.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Runs the provided tasks until either:
    /// - all tasks exit on their own, or
    /// - a termination signal arrives or [`Flow::shutdown`] is called,
    ///   which starts a graceful shutdown (may end with
    ///   [`RuntimeError::GraceExceeded`]).
    pub async fn run(&self, tasks: Vec<TaskRef>) -> Result<(), RuntimeError> {
        self.observer_listener();

        let mut set = JoinSet::new();
        self.spawn_tasks(&mut set, tasks);
        self.drive_shutdown(&mut set).await
    }

    /// Subscribes to the bus and forwards events to the observer set.
    fn observer_listener(&self) {
        let mut rx = self.bus.subscribe();
        let observers = Arc::clone(&self.observers);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                observers.emit(&ev);
            }
        });
    }

    /// Spawns one tokio task per [`TaskRef`], each with a child token.
    fn spawn_tasks(&self, set: &mut JoinSet<()>, tasks: Vec<TaskRef>) {
        for task in tasks {
            let child = self.token.child_token();
            let bus = self.bus.clone();
            set.spawn(async move {
                let name: Arc<str> = Arc::from(task.name());
                if let Err(e) = task.run(child).await {
                    bus.publish(
                        FlowEvent::new(EventKind::ProducerFailed)
                            .with_node(name)
                            .with_detail(e.to_string()),
                    );
                }
            });
        }
    }

    /// Waits until all tasks finish or a shutdown is requested.
    async fn drive_shutdown(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        tokio::select! {
            _ = shutdown::wait_for_signal() => {
                self.bus.publish(FlowEvent::new(EventKind::ShutdownRequested));
                self.token.cancel();
                self.wait_with_grace(set).await
            }
            _ = self.token.cancelled() => {
                self.bus.publish(FlowEvent::new(EventKind::ShutdownRequested));
                self.wait_with_grace(set).await
            }
            _ = async { while set.join_next().await.is_some() {} } => {
                Ok(())
            }
        }
    }

    /// Waits for all tasks to finish within the configured grace period.
    async fn wait_with_grace(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let drained = async { while set.join_next().await.is_some() {} };

        match tokio::time::timeout(grace, drained).await {
            Ok(()) => {
                self.bus.publish(FlowEvent::new(EventKind::AllStopped));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(FlowEvent::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded { grace })
            }
        }
    }
}
