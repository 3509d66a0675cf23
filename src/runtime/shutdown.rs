//! # OS signal handling.
//!
//! [`wait_for_signal`] completes when the process receives a termination
//! signal: SIGINT or SIGTERM on Unix, Ctrl-C elsewhere.

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners. Returns `Ok(())` when a
/// signal is received, or `Err` if listener registration fails.
#[cfg(unix)]
pub(crate) async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
