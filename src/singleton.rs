//! Lazy, exactly-once singleton holder.
//!
//! Holds at most one instance of a type behind two one-shot gates: one for
//! construction, one for teardown. The common-case read path after first
//! initialization is a shared read-lock clone of an `Arc`, with the init
//! `Once` in its fast path.

use crate::error::{Error, Result};
use parking_lot::{Once, RwLock};
use std::sync::Arc;

/// Lifecycle of the held instance. A destroyed slot is distinct from an
/// empty one: once `Destroyed`, the holder never constructs again, even
/// when a `get` races the `destroy`.
enum Slot<T> {
    Empty,
    Live(Arc<T>),
    Destroyed,
}

/// Process-wide holder for at most one `T`.
///
/// Construction races resolve to exactly one `T::default()`; every caller
/// observes the same instance. Destruction is idempotent: the first
/// `destroy` drops the holder's reference, every later call is a no-op.
/// Both gates are per-holder, shared across all calls, never per call
/// site.
///
/// Policy: `get` after `destroy` fails with [`Error::UseAfterDestroy`];
/// there is no implicit re-creation.
pub struct Singleton<T> {
    init: Once,
    teardown: Once,
    slot: RwLock<Slot<T>>,
}

impl<T> Singleton<T> {
    /// Const so holders can live in statics.
    pub const fn new() -> Self {
        Self {
            init: Once::new(),
            teardown: Once::new(),
            slot: RwLock::new(Slot::Empty),
        }
    }

    /// Non-constructing peek at the held instance.
    pub fn try_get(&self) -> Option<Arc<T>> {
        match &*self.slot.read() {
            Slot::Live(instance) => Some(instance.clone()),
            _ => None,
        }
    }

    /// Whether `destroy` has completed.
    pub fn is_destroyed(&self) -> bool {
        matches!(&*self.slot.read(), Slot::Destroyed)
    }

    /// Release the held instance.
    ///
    /// Exactly one caller performs the release; concurrent and repeated
    /// calls are no-ops. The value's own teardown runs once the last
    /// outstanding `Arc` clone is dropped. Destroying a holder that was
    /// never initialized retires it permanently: later `get` calls fail
    /// rather than construct.
    pub fn destroy(&self) {
        self.teardown.call_once(|| {
            *self.slot.write() = Slot::Destroyed;
        });
    }
}

impl<T: Default> Singleton<T> {
    /// Return the held instance, constructing it on first use.
    ///
    /// The first caller across all threads runs `T::default()`; concurrent
    /// callers block on the init gate and then observe that same instance.
    ///
    /// The empty/live/destroyed state is one value under one lock, and the
    /// init closure re-checks it while holding the write lock. A `destroy`
    /// racing this call therefore either loses (the instance is built,
    /// then torn down by the destroy) or wins (the slot is already
    /// `Destroyed`, nothing is built). Nothing can be constructed after
    /// the destroy has completed.
    pub fn get(&self) -> Result<Arc<T>> {
        self.init.call_once(|| {
            let mut slot = self.slot.write();
            if matches!(*slot, Slot::Empty) {
                *slot = Slot::Live(Arc::new(T::default()));
            }
        });

        match &*self.slot.read() {
            Slot::Live(instance) => Ok(instance.clone()),
            _ => Err(Error::UseAfterDestroy),
        }
    }
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Singleton<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.slot.read() {
            Slot::Empty => "empty",
            Slot::Live(_) => "live",
            Slot::Destroyed => "destroyed",
        };
        f.debug_struct("Singleton").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Default for Counted {
        fn default() -> Self {
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            Counted
        }
    }

    #[test]
    fn concurrent_get_constructs_once() {
        CONSTRUCTIONS.store(0, Ordering::SeqCst);
        let holder = Singleton::<Counted>::new();

        thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| holder.get().unwrap())).collect();
            let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            for pair in instances.windows(2) {
                assert!(Arc::ptr_eq(&pair[0], &pair[1]));
            }
        });

        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destroy_is_idempotent() {
        let holder = Singleton::<String>::new();
        let _ = holder.get().unwrap();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| holder.destroy());
            }
        });

        assert!(holder.is_destroyed());
        holder.destroy();
        assert!(holder.is_destroyed());
    }

    static DROPS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct DropCounted;

    impl Drop for DropCounted {
        fn drop(&mut self) {
            DROPS.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn concurrent_destroy_one_teardown() {
        DROPS.store(0, Ordering::SeqCst);
        let holder = Singleton::<DropCounted>::new();
        drop(holder.get().unwrap());

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| holder.destroy());
            }
        });

        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn get_after_destroy_fails() {
        let holder = Singleton::<String>::new();
        let _ = holder.get().unwrap();
        holder.destroy();

        assert_eq!(holder.get().unwrap_err(), Error::UseAfterDestroy);
        assert!(holder.try_get().is_none());
    }

    #[test]
    fn destroy_before_get_retires_holder() {
        let holder = Singleton::<String>::new();
        holder.destroy();

        assert_eq!(holder.get().unwrap_err(), Error::UseAfterDestroy);
    }

    #[test]
    fn get_racing_destroy_never_revives() {
        for _ in 0..10_000 {
            let holder = Singleton::<String>::new();

            thread::scope(|s| {
                s.spawn(|| {
                    let _ = holder.get();
                });
                s.spawn(|| holder.destroy());
            });

            // destroy has completed, so nothing may be live and nothing
            // may ever be constructed again
            assert!(holder.is_destroyed());
            assert!(holder.try_get().is_none());
            assert_eq!(holder.get().unwrap_err(), Error::UseAfterDestroy);
        }
    }
}
