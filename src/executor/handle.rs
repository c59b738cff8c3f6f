//! One-shot handle to a submitted task's eventual result.

use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Build the producer/consumer pair for one submission.
///
/// A bounded channel of capacity 1 carries exactly one message: the task's
/// return value or its captured failure.
pub(crate) fn result_channel<T>() -> (ResultSlot<T>, TaskHandle<T>) {
    let (tx, rx) = bounded(1);
    (ResultSlot { tx: Some(tx) }, TaskHandle { rx })
}

/// Producer half, owned by the wrapped task; fulfilled exactly once by the
/// worker that runs it.
///
/// Dropping an unfulfilled slot delivers a failure instead, so the channel
/// always carries exactly one message and the handle never reports an
/// abandoned task as pending.
pub(crate) struct ResultSlot<T> {
    tx: Option<Sender<Result<T>>>,
}

impl<T> ResultSlot<T> {
    /// Store the outcome and signal readiness. The send only fails when the
    /// caller dropped the handle without joining, which is fine to ignore.
    pub fn fulfill(mut self, outcome: Result<T>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(outcome);
        }
    }
}

impl<T> Drop for ResultSlot<T> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(Error::task_failed("task dropped before completion")));
        }
    }
}

/// Caller-held handle to a submitted task.
///
/// `join` consumes the handle, so each result is read at most once; a second
/// read is a compile error rather than a runtime policy question.
pub struct TaskHandle<T> {
    rx: Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Block until the task completes, then return its value or the failure
    /// captured while running it.
    pub fn join(self) -> Result<T> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            // Unreachable in practice: the producer fulfills on drop. Kept
            // so a disconnect still surfaces as an error, not a panic.
            Err(_) => Err(Error::task_failed("task dropped before completion")),
        }
    }

    /// Non-blocking readiness probe. Once `true`, `join` returns without
    /// blocking.
    pub fn is_finished(&self) -> bool {
        !self.rx.is_empty()
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}
