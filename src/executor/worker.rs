// worker thread stuff

use super::queue::TaskQueue;
use super::task::Task;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub type WorkerId = usize;

pub(crate) struct Worker {
    pub id: WorkerId,
}

impl Worker {
    pub fn new(id: WorkerId) -> Self {
        Self { id }
    }

    /// Main loop: block on the queue, run one task at a time, exit when the
    /// queue reports closed-and-empty. The queue lock is never held while a
    /// task body runs.
    pub fn run(&self, queue: Arc<TaskQueue>) {
        while let Some(task) = queue.pop() {
            self.execute_task(task);
        }
    }

    fn execute_task(&self, task: Task) {
        let tid = task.id;

        // Submission wraps every task body in its own panic capture, so an
        // unwind reaching this point means the wrapper itself misbehaved.
        // Catch it anyway: one bad task must not take the worker down.
        let result = catch_unwind(AssertUnwindSafe(|| {
            task.execute();
        }));

        if result.is_err() {
            eprintln!("worker {}: task {:?} panicked", self.id, tid);
        }
    }
}
