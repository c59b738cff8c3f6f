//! Task execution infrastructure.
//!
//! This module provides the core primitives: the type-erased task, the
//! mutex/condvar FIFO queue, the worker loop, the pool itself, and the
//! one-shot result handle returned per submission.

pub mod handle;
pub mod pool;
pub mod queue;
pub mod task;
pub mod worker;

pub use handle::TaskHandle;
pub use pool::WorkerPool;
pub use task::TaskId;
