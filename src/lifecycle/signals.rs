//! OS signal handling.
//!
//! Ctrl+C or an internal broadcast both resolve the shutdown future handed
//! to `axum::serve`.

use tokio::sync::broadcast;

/// Wait for Ctrl+C or an internal shutdown trigger.
pub async fn shutdown_signal(mut internal: broadcast::Receiver<()>) {
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                // Fall back to the internal trigger only.
                let _ = internal.recv().await;
            }
        }
        _ = internal.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
