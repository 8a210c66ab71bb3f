//! Line-oriented trigger.
//!
//! One worker thread performs a single blocking `read_line` and signals
//! through a one-shot channel. The signal is sent on every outcome,
//! including EOF and read errors, so a closed input can never leave the
//! poller waiting forever.

use std::io::BufRead;
use std::thread;

use figkeep_common::error::{FigkeepError, Result};
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::KeyTrigger;

/// Fires once a line (or EOF) has been read from its source.
#[derive(Debug)]
pub struct EnterTrigger {
    done: oneshot::Receiver<()>,
    fired: bool,
}

impl EnterTrigger {
    /// Spawns the reader thread over `source`.
    ///
    /// The thread is detached. If the trigger is dropped first, the thread
    /// stays parked in its read until the process exits; it holds nothing
    /// that needs releasing.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::Unsupported`] if the thread cannot be spawned.
    pub fn spawn<R>(mut source: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let _worker = thread::Builder::new()
            .name("figkeep-enter".into())
            .spawn(move || {
                let mut line = String::new();
                match source.read_line(&mut line) {
                    Ok(0) => tracing::debug!("standard input closed"),
                    Ok(n) => tracing::debug!(bytes = n, "line read"),
                    Err(e) => tracing::debug!(error = %e, "line read failed"),
                }
                let _ = tx.send(());
            })
            .map_err(|e| FigkeepError::unsupported("enter reader thread", e))?;
        Ok(Self {
            done: rx,
            fired: false,
        })
    }
}

impl KeyTrigger for EnterTrigger {
    fn poll(&mut self) -> bool {
        if !self.fired {
            match self.done.try_recv() {
                // A closed channel means the worker died without sending.
                Ok(()) | Err(TryRecvError::Closed) => self.fired = true,
                Err(TryRecvError::Empty) => {}
            }
        }
        self.fired
    }
}
