//! FIFO task queue shared by the submission path and the workers.

use super::task::Task;
use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct Inner {
    tasks: VecDeque<Task>,
    closed: bool,
}

/// Bounded-lifetime FIFO buffer of pending tasks.
///
/// One mutex guards both the buffer and the stop flag; the condvar is paired
/// with that mutex. Keeping both under a single lock is what rules out the
/// lost-wakeup race between `close()` and a worker going to sleep.
pub(crate) struct TaskQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Append a task at the tail and wake one waiting worker.
    ///
    /// Fails with [`Error::PoolStopped`] once the queue is closed; the task
    /// is dropped, never enqueued.
    pub fn push(&self, task: Task) -> Result<()> {
        {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(Error::PoolStopped);
            }
            inner.tasks.push_back(task);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Remove and return the head task, blocking until one is available.
    ///
    /// Returns `None` only when the queue is closed *and* empty. A closed
    /// queue still drains: dequeueing takes priority over the stop flag.
    pub fn pop(&self) -> Option<Task> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(task) = inner.tasks.pop_front() {
                return Some(task);
            }
            if inner.closed {
                return None;
            }
            self.available.wait(&mut inner);
        }
    }

    /// Set the stop flag and wake every waiter.
    pub fn close(&self) {
        {
            let mut inner = self.inner.lock();
            inner.closed = true;
        }
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }
}
