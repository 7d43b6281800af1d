//! Dynamic values stored in place of erased generic types.
//!
//! Generated spies cannot name a method's own generic parameters in their
//! storage, so those slots hold one of three wrappers:
//!
//! - [`Erased`]: shared and thread-safe, logged by locked spies and used
//!   for associated types declared without a default;
//! - [`LocalErased`]: shared, logged by plain spies, so erased arguments
//!   need nothing beyond `'static`;
//! - [`ErasedReturn`]: owned, produced by handlers of generic returns and
//!   moved out at the call site, so the returned type needs no `Clone`.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A shared, thread-safe value whose static type was erased.
#[derive(Clone)]
pub struct Erased {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Erased {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the concrete type this value was created from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for Erased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Erased").field(&self.type_name).finish()
    }
}

/// A shared value whose static type was erased, confined to one thread.
#[derive(Clone)]
pub struct LocalErased {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl LocalErased {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for LocalErased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalErased").field(&self.type_name).finish()
    }
}

/// An owned value a handler produces for a generic return type.
pub struct ErasedReturn {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl ErasedReturn {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Moves the concrete value out, handing the wrapper back on a type mismatch.
    pub fn try_downcast<T: Any>(self) -> Result<T, ErasedReturn> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| ErasedReturn { value, type_name })
    }

    /// Recovers the concrete value for the typed position of a generated spy.
    ///
    /// # Panics
    ///
    /// Panics, naming `owner.field`, when the value is not a `T`.
    #[track_caller]
    pub fn downcast<T: Any>(self, owner: &str, field: &str) -> T {
        match self.try_downcast::<T>() {
            Ok(value) => value,
            Err(erased) => panic!(
                "{owner}.{field} produced a value of type `{}`, but the call site expects `{}`",
                erased.type_name,
                type_name::<T>()
            ),
        }
    }
}

impl fmt::Debug for ErasedReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErasedReturn").field(&self.type_name).finish()
    }
}
