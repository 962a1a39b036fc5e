//! Caller-driven cancellation for zone operations.

use tokio::sync::watch;

/// Cancellation signal accepted by every zone operation.
///
/// Cloning is cheap; all clones observe the same [`CancelHandle`]. A signal from
/// [`CancelSignal::never`] (also the `Default`) never fires.
///
/// ```rust
/// use dns_orchestrator_zones::CancelSignal;
///
/// let (handle, signal) = CancelSignal::pair();
/// assert!(!signal.is_cancelled());
/// handle.cancel();
/// assert!(signal.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

/// Trigger side of a [`CancelSignal`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// A connected handle/signal pair.
    pub fn pair() -> (CancelHandle, Self) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, Self { rx: Some(rx) })
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once the signal fires. Pends forever if it never will, including
    /// when the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        if let Some(rx) = &self.rx {
            let mut rx = rx.clone();
            let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
            if fired {
                return;
            }
        }
        std::future::pending::<()>().await;
    }
}

impl CancelHandle {
    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Another signal connected to this handle.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: Some(self.tx.subscribe()),
        }
    }
}
