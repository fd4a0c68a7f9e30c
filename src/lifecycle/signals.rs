//! OS signal handling.
//!
//! SIGINT (Ctrl-C) interrupts the run: the runner stops waiting, logs the
//! interruption through its error path and still disconnects.
//!
//! Only the first Ctrl-C is handled, and it takes effect at the runner's next
//! wait point, so an in-flight RPC call can delay it up to its request timeout.

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers `shutdown` on the first Ctrl-C.
pub fn listen_for_ctrl_c(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, stopping run");
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
        }
    })
}
