//! Signal-driven shutdown of the lock server.
//!
//! actix's own signal handling is disabled in [`super::lock_server`], so the
//! binary races the server against [`shutdown_signal`] through
//! [`serve_until`]. On a signal the server stops accepting connections and
//! in-flight lock requests get `server.shutdown_timeout_secs` to finish.
//! Lock state is in memory only and is dropped with the process.

use std::future::Future;

use actix_web::dev::Server;
use tracing::{error, info};

/// Process signal that asked the server to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl+C / SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ShutdownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Interrupt => "interrupt",
            ShutdownReason::Terminate => "terminate",
        }
    }
}

/// Resolves once Ctrl+C or SIGTERM is received.
///
/// A handler that fails to install never resolves, leaving the other one in
/// charge.
pub async fn shutdown_signal() -> ShutdownReason {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => ShutdownReason::Interrupt,
        _ = terminate => ShutdownReason::Terminate,
    }
}

/// Runs `server` until it exits on its own or `signal` resolves.
///
/// Returns the reason when a signal triggered a graceful stop, `None` when the
/// server stopped by itself.
pub async fn serve_until<F>(server: Server, signal: F) -> std::io::Result<Option<ShutdownReason>>
where
    F: Future<Output = ShutdownReason>,
{
    let handle = server.handle();
    let mut server = std::pin::pin!(server);

    let reason = tokio::select! {
        result = &mut server => return result.map(|_| None),
        reason = signal => reason,
    };

    info!(reason = reason.as_str(), "Shutdown initiated, draining in-flight lock requests");

    // The server future must keep running to process the stop command
    let ((), result) = tokio::join!(handle.stop(true), server);
    result.map(|_| Some(reason))
}
