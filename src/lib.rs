//! TASKWELL - a fixed-size worker thread pool with one-shot result handles.
//!
//! A bounded set of long-lived worker threads pulls from one FIFO queue;
//! every submission returns a handle the caller can later block on for the
//! task's value or its captured failure. A generic lazy singleton holder
//! provides an optional process-wide default pool.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskwell::prelude::*;
//!
//! let pool = WorkerPool::new(&Config::builder().num_threads(2).build()?)?;
//!
//! let sum = pool.submit(|| 3 + 4)?;
//! let product = pool.submit(|| 10 * 10)?;
//!
//! assert_eq!(sum.join()?, 7);
//! assert_eq!(product.join()?, 100);
//!
//! pool.shutdown();
//! # Ok::<(), taskwell::Error>(())
//! ```
//!
//! # Guarantees
//!
//! - **FIFO dispatch**: tasks are dequeued in submission order (completion
//!   order across workers is unordered)
//! - **Panic isolation**: a panicking task is delivered as an error through
//!   its handle; the worker thread keeps running
//! - **Clean shutdown**: `shutdown` rejects new work, drains the queue, and
//!   joins every worker exactly once; calling it twice is a no-op
//! - **Exactly-once global**: the lazy holder constructs one instance under
//!   any amount of contention and tears it down at most once

// Lint configuration
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod runtime;
pub mod singleton;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use executor::{TaskHandle, WorkerPool};
pub use runtime::{global, shutdown};
pub use singleton::Singleton;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_submit_join() {
        let pool = WorkerPool::with_defaults().unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| pool.submit(move || i * 2).unwrap())
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), i * 2);
        }

        pool.shutdown();
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let pool = WorkerPool::new(&Config::builder().num_threads(1).build().unwrap()).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                pool.submit(move || {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                    i
                })
                .unwrap()
            })
            .collect();

        pool.shutdown();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), i);
        }
    }

    #[test]
    fn test_worker_count_is_fixed() {
        let pool = WorkerPool::new(&Config::builder().num_threads(3).build().unwrap()).unwrap();
        assert_eq!(pool.num_threads(), 3);
        pool.shutdown();
        assert_eq!(pool.num_threads(), 3);
    }
}
