//! Ctrl-C to watch-channel plumbing

use tokio::sync::watch;
use tracing::{error, info};

/// Spawns the Ctrl-C listener and hands out the shutdown receiver.
///
/// Every consume loop selects on the receiver, so one signal drains all
/// in-flight polls and the process exits cleanly.
pub fn signal() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(_) => info!("received Ctrl-C signal"),
            Err(e) => error!("failed to listen for Ctrl-C: {e}"),
        }
        let _ = tx.send(true);
    });
    rx
}
