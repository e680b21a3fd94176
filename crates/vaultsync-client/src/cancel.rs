//! Cooperative cancellation for vault calls.
//!
//! A [`CancelSignal`] is threaded through every reconciler operation. Each
//! vault call is gated on it: a fired signal stops the next call from being
//! issued, and a call in flight is abandoned. Whatever the vault already did
//! stays done.

use std::future::Future;

use tokio::sync::watch;

use crate::error::{ClientError, Result};

/// Fires a [`CancelSignal`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Caller-supplied cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

/// Create a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx: Some(rx) })
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rx: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Fail fast if the signal already fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        Ok(())
    }

    /// Resolve once the signal fires. Pending forever for [`CancelSignal::never`]
    /// or when the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        match &self.rx {
            Some(rx) => {
                let mut rx = rx.clone();
                let fired = rx.wait_for(|fired| *fired).await.is_ok();
                if !fired {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Issue a vault call under this signal.
    pub async fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ClientError::Cancelled),
            result = call => result,
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}
