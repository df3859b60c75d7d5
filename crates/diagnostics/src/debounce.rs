use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{RecvTimeoutError, Sender};
use store::Language;

use crate::Diagnostic;

/// Quiet period after the last change before validating
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Result of a debounced validation run
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Value returned by the [`Debouncer::schedule`] call this result belongs to
    pub generation: u64,
    pub language: Language,
    pub diagnostics: Vec<Diagnostic>,
}

struct Request {
    generation: u64,
    source: String,
    language: Language,
}

/// Runs validation on a background thread once the buffer stops changing
///
/// Each call to [`Debouncer::schedule`] supersedes the pending request and restarts the delay,
/// so only the latest request is ever validated. Dropping the debouncer discards anything still
/// pending.
pub struct Debouncer {
    tx: Option<Sender<Request>>,
    generation: u64,
    worker: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn spawn<F>(delay: Duration, mut on_validated: F) -> Self
    where
        F: FnMut(Validation) + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded::<Request>();

        let worker = thread::spawn(move || {
            while let Ok(mut pending) = rx.recv() {
                loop {
                    match rx.recv_timeout(delay) {
                        Ok(newer) => {
                            tracing::trace!(
                                superseded = pending.generation,
                                generation = newer.generation,
                                "rescheduling validation"
                            );
                            pending = newer;
                        }
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => {
                            tracing::debug!(
                                generation = pending.generation,
                                "debouncer closed, discarding pending validation"
                            );
                            return;
                        }
                    }
                }

                let diagnostics = crate::validate(&pending.source, pending.language);
                on_validated(Validation {
                    generation: pending.generation,
                    language: pending.language,
                    diagnostics,
                });
            }
            tracing::debug!("debouncer worker finished");
        });

        Self {
            tx: Some(tx),
            generation: 0,
            worker: Some(worker),
        }
    }

    /// Schedule validation of `source`, cancelling any pending request
    pub fn schedule(&mut self, source: impl Into<String>, language: Language) -> u64 {
        self.generation += 1;
        let request = Request {
            generation: self.generation,
            source: source.into(),
            language,
        };

        if let Some(tx) = &self.tx {
            if tx.send(request).is_err() {
                tracing::warn!("debouncer worker has stopped, dropping request");
            }
        }
        self.generation
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // closing the channel wakes the worker
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("debouncer worker panicked");
            }
        }
    }
}
