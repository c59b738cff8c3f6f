use super::handle::{result_channel, TaskHandle};
use super::queue::TaskQueue;
use super::task::Task;
use super::worker::{Worker, WorkerId};
use crate::config::Config;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Fixed-size pool of worker threads sharing one FIFO task queue.
///
/// The worker count is fixed at construction and never changes. Shutdown is
/// explicit and idempotent; dropping the pool shuts it down too.
pub struct WorkerPool {
    workers: Mutex<Vec<WorkerHandle>>,
    queue: Arc<TaskQueue>,
    num_threads: usize,
}

struct WorkerHandle {
    #[allow(dead_code)]
    id: WorkerId,
    thread: Option<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `config.worker_threads()` workers, each running the worker
    /// loop against a shared queue.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let num_threads = config.worker_threads();

        let queue = Arc::new(TaskQueue::new());
        let mut handles = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id);
            let queue_clone = queue.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let thread = builder
                .spawn(move || {
                    worker.run(queue_clone);
                })
                .map_err(|e| Error::executor(format!("spawn failed: {}", e)))?;

            handles.push(WorkerHandle {
                id,
                thread: Some(thread),
            });
        }

        Ok(Self {
            workers: Mutex::new(handles),
            queue,
            num_threads,
        })
    }

    /// Pool with the default config (one worker per logical CPU).
    pub fn with_defaults() -> Result<Self> {
        Self::new(&Config::default())
    }

    /// Submit a closure for execution, returning a one-shot handle to its
    /// result.
    ///
    /// The closure and everything it captures are moved into the queue. A
    /// panic inside `f` is caught and delivered through the handle as
    /// [`Error::TaskPanic`]; it never reaches the worker loop. Fails with
    /// [`Error::PoolStopped`] once shutdown has begun: the task is
    /// rejected, not enqueued.
    pub fn submit<F, T>(&self, f: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (slot, handle) = result_channel();

        let task = Task::new(move || {
            let outcome = catch_unwind(AssertUnwindSafe(f))
                .map_err(|payload| Error::TaskPanic(panic_message(payload)));
            slot.fulfill(outcome);
        });

        self.queue.push(task)?;
        Ok(handle)
    }

    /// Number of workers, fixed at construction.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Tasks queued but not yet picked up by a worker.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.queue.is_closed()
    }

    /// Stop accepting work, wake every worker, and join them all.
    ///
    /// Tasks already queued still run to completion before the workers
    /// exit. Idempotent: each worker is joined exactly once, and a second
    /// call returns immediately.
    pub fn shutdown(&self) {
        self.queue.close();

        let mut workers = self.workers.lock();
        for worker in workers.iter_mut() {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Default for WorkerPool {
    /// Default construction path used by the lazy global holder.
    ///
    /// Panics only if the OS refuses to spawn threads, in which case there
    /// is no pool to hand out anyway.
    fn default() -> Self {
        Self::with_defaults().expect("default worker pool construction")
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .field("pending_tasks", &self.pending_tasks())
            .field("is_shutdown", &self.is_shutdown())
            .finish()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
