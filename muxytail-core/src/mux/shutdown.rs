use super::MuxError;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;

/// One-shot, process-wide stop signal.
///
/// Every long-running task holds a [`ShutdownListener`]. Firing is
/// idempotent and never fails, even when nobody is listening.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        let already = self.tx.send_replace(true);
        if !already {
            tracing::info!("shutdown signaled");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }
}

pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Resolves once shutdown has fired, immediately if it already has.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}

/// SIGINT fires `shutdown`; SIGQUIT is swallowed. Returns once shutdown
/// has fired for any reason.
pub async fn install_signal_handlers(shutdown: Shutdown) -> Result<(), MuxError> {
    let mut interrupt = signal(SignalKind::interrupt()).map_err(MuxError::Signal)?;
    let mut quit = signal(SignalKind::quit()).map_err(MuxError::Signal)?;
    let mut listener = shutdown.subscribe();

    loop {
        tokio::select! {
            _ = listener.wait() => return Ok(()),
            Some(()) = interrupt.recv() => {
                tracing::info!("SIGINT received");
                shutdown.trigger();
            }
            Some(()) = quit.recv() => {
                tracing::debug!("SIGQUIT ignored");
            }
        }
    }
}
