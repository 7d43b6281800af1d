//! Lock handles used by locked spies.

use std::sync::{Mutex, PoisonError};

/// A value exposing an exclusive critical section over the value it owns.
pub trait CriticalSection<T> {
    /// Runs `f` with exclusive access to the guarded value and returns its result.
    fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

/// Portable lock handle backed by [`std::sync::Mutex`].
///
/// Poisoning is ignored: the guarded state is plain bookkeeping and a test
/// that panicked while holding it must not cascade into every later access.
#[derive(Debug, Default)]
pub struct PortableLock<T> {
    inner: Mutex<T>,
}

impl<T> PortableLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> CriticalSection<T> for PortableLock<T> {
    fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        PortableLock::with_lock(self, f)
    }
}

/// High-performance lock handle backed by [`parking_lot::Mutex`].
///
/// Only available where generated spies select it: `any(unix, windows)`.
#[cfg(any(unix, windows))]
#[derive(Debug, Default)]
pub struct FastLock<T> {
    inner: parking_lot::Mutex<T>,
}

#[cfg(any(unix, windows))]
impl<T> FastLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: parking_lot::Mutex::new(value),
        }
    }

    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

#[cfg(any(unix, windows))]
impl<T> CriticalSection<T> for FastLock<T> {
    fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        FastLock::with_lock(self, f)
    }
}
