// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) trigger a graceful shutdown.
// On non-Unix targets only Ctrl+C is supported.

use crate::logger;

/// Resolve once a shutdown signal has been received
#[cfg(unix)]
pub async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            return ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => logger::log_warning("SIGTERM received, shutting down"),
        () = ctrl_c() => {}
    }
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_warning("SIGINT received, shutting down"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
