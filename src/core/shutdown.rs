//! Signal-driven shutdown for the periodic refresh loop
//!
//! A refresh round in progress is never interrupted; the loop checks for a
//! shutdown request between rounds and while sleeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared shutdown flag plus a broadcast to wake sleepers
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(8);
        Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Trigger shutdown on the first Ctrl-C/SIGTERM; exit immediately on the second
    ///
    /// Must be called from within a tokio runtime.
    pub fn install_signal_handlers(&self) {
        #[cfg(unix)]
        {
            // Restore default SIGPIPE so piping the report into `head` ends quietly
            unsafe {
                libc::signal(libc::SIGPIPE, libc::SIG_DFL);
            }

            use tokio::signal::unix::{signal, SignalKind};
            for kind in [SignalKind::interrupt(), SignalKind::terminate()] {
                let coordinator = self.clone();
                tokio::spawn(async move {
                    if let Ok(mut sig) = signal(kind) {
                        while sig.recv().await.is_some() {
                            coordinator.on_signal();
                        }
                    }
                });
            }
        }

        #[cfg(not(unix))]
        {
            let coordinator = self.clone();
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    coordinator.on_signal();
                }
            });
        }
    }

    fn on_signal(&self) {
        if self.is_shutdown_requested() {
            log::warn!("Second interrupt received; exiting");
            std::process::exit(130);
        }
        log::info!("Interrupt received; stopping after the current refresh round");
        self.trigger_shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
