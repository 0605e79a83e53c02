//! Process shutdown signals.
//!
//! Interactive runs stop with Ctrl-C (SIGINT); `systemctl stop` sends
//! SIGTERM.  Both clear the relay's `running` flag so the loop returns and
//! the serial port is flushed and closed on the way out.
//!
//! Handlers are registered in [`ShutdownSignal::install`], so a signal that
//! arrives before the waiting task first runs is not lost.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::task::JoinHandle;
use tracing::info;

/// Registered shutdown signal handlers.
pub struct ShutdownSignal {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Registers the handlers.  Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the SIGTERM handler cannot be registered.
    pub fn install() -> std::io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                terminate: signal(SignalKind::terminate())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Waits for the first shutdown signal and returns its name.
    pub async fn recv(self) -> &'static str {
        #[cfg(unix)]
        {
            let mut terminate = self.terminate;
            tokio::select! {
                Ok(()) = tokio::signal::ctrl_c() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
            }
        }
        #[cfg(not(unix))]
        {
            let Self {} = self;
            // A failed Ctrl-C registration leaves the agent running until killed.
            match tokio::signal::ctrl_c().await {
                Ok(()) => "Ctrl-C",
                Err(_) => std::future::pending().await,
            }
        }
    }
}

/// Installs the handlers and spawns a task that clears `running` on the first
/// shutdown signal.
///
/// # Errors
///
/// See [`ShutdownSignal::install`].
pub fn watch(running: Arc<AtomicBool>) -> std::io::Result<JoinHandle<()>> {
    let signal = ShutdownSignal::install()?;
    Ok(tokio::spawn(async move {
        let name = signal.recv().await;
        info!("shutdown signal received ({name})");
        running.store(false, Ordering::Relaxed);
    }))
}
