//! Process-wide default pool.
//!
//! Most components should own their pool and pass it by `Arc` instead of
//! reaching for an ambient global; this module exists for the cases where a
//! true global is unavoidable. It is a thin instantiation of
//! [`Singleton`](crate::singleton::Singleton) for [`WorkerPool`].

use crate::error::Result;
use crate::executor::WorkerPool;
use crate::singleton::Singleton;
use std::sync::Arc;

static GLOBAL_POOL: Singleton<WorkerPool> = Singleton::new();

/// The shared default pool, constructed on first use with the default
/// config.
///
/// Fails with [`Error::UseAfterDestroy`](crate::Error::UseAfterDestroy)
/// once [`shutdown`] has run; the global pool is never re-created.
pub fn global() -> Result<Arc<WorkerPool>> {
    GLOBAL_POOL.get()
}

/// Tear down the global pool: stop accepting work, drain what is queued,
/// and join every worker before returning. Idempotent.
pub fn shutdown() {
    let existing = GLOBAL_POOL.try_get();
    GLOBAL_POOL.destroy();

    // Joining here guarantees the drain has finished by the time this
    // returns, even if other holders still keep the Arc alive.
    if let Some(pool) = existing {
        pool.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global holder is one-shot per process, so the whole lifecycle
    // lives in a single test.
    #[test]
    fn global_pool_lifecycle() {
        let pool = global().unwrap();
        let again = global().unwrap();
        assert!(Arc::ptr_eq(&pool, &again));

        let handle = pool.submit(|| 21 * 2).unwrap();
        assert_eq!(handle.join().unwrap(), 42);

        shutdown();
        shutdown();

        assert!(global().is_err());
        assert!(pool.is_shutdown());
    }
}
