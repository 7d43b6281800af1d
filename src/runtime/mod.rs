//! Support library linked by generated spies.
//!
//! Generated code refers to everything here through absolute
//! `::spygen::runtime::` paths, so nothing needs to be imported by the
//! crate that includes a spy.
//!
//! - [`PortableLock`] / [`FastLock`]: the mutual-exclusion handles behind
//!   locked spies. Both expose one operation, [`CriticalSection::with_lock`].
//! - [`Erased`], [`LocalErased`], [`ErasedReturn`]: the dynamic values used
//!   where a generic parameter had to be erased from storage.
//! - [`Isolation`]: the serialization gate of isolated spies.
//! - [`unconfigured_handler`], [`unset_value`]: the fatal signals raised by
//!   incomplete test setup.

mod erased;
mod isolation;
mod lock;
mod signal;

pub use erased::{Erased, ErasedReturn, LocalErased};
pub use isolation::{Isolated, Isolation, IsolationTurn};
#[cfg(any(unix, windows))]
pub use lock::FastLock;
pub use lock::{CriticalSection, PortableLock};
pub use signal::{lookup, unconfigured_handler, unset_value, upsert};

/// Boxed future returned by handlers of `async` requirements on locked spies.
pub type BoxFuture<T> = futures::future::BoxFuture<'static, T>;

/// Boxed future returned by handlers of `async` requirements on plain spies.
pub type LocalBoxFuture<T> = futures::future::LocalBoxFuture<'static, T>;
