//! Concurrency strategy selection.
//!
//! The shape of a generated spy follows from the capability markers its
//! trait declares. Locked shapes additionally pick their lock handle(s).

use crate::config::GeneratorOptions;
use crate::model::{CapabilityMarker, CfgPredicate};
use quote::quote;
use serde::Serialize;
use syn::{parse_quote, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyShape {
    /// Interior mutability through `Cell`/`RefCell`; single-threaded.
    Plain,
    /// One state aggregate behind one lock handle.
    LockedValue,
    /// The locked aggregate plus an isolation gate for async requirements.
    IsolatedLockedUnit,
}

impl ConcurrencyShape {
    fn transition(self, marker: CapabilityMarker) -> Self {
        match (self, marker) {
            (Self::IsolatedLockedUnit, _) | (_, CapabilityMarker::IsolatedUnit) => {
                Self::IsolatedLockedUnit
            }
            (_, CapabilityMarker::ThreadSafeValue) => Self::LockedValue,
        }
    }

    pub fn is_locked(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// Resolves declared markers into a shape; isolation dominates thread safety.
pub fn select_shape(markers: &[CapabilityMarker]) -> ConcurrencyShape {
    markers
        .iter()
        .fold(ConcurrencyShape::Plain, |shape, marker| shape.transition(*marker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockFlavor {
    /// `parking_lot`-backed, available on `unix` and `windows`.
    Fast,
    /// `std::sync::Mutex`-backed, available everywhere.
    Portable,
}

impl LockFlavor {
    pub fn handle_type(self, state: &syn::Ident) -> Type {
        match self {
            Self::Fast => parse_quote!(::spygen::runtime::FastLock<#state>),
            Self::Portable => parse_quote!(::spygen::runtime::PortableLock<#state>),
        }
    }
}

/// One declaration of the spy type and the predicate that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockVariant {
    pub flavor: LockFlavor,
    pub predicate: Option<CfgPredicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePlan {
    pub shape: ConcurrencyShape,
    /// Empty for `Plain`.
    pub variants: Vec<LockVariant>,
}

impl ShapePlan {
    pub fn flavors(&self) -> Vec<LockFlavor> {
        self.variants.iter().map(|variant| variant.flavor).collect()
    }
}

/// Chooses the shape and, for locked shapes, the lock variants.
pub fn plan(markers: &[CapabilityMarker], options: &GeneratorOptions) -> ShapePlan {
    let shape = select_shape(markers);
    let variants = if !shape.is_locked() {
        Vec::new()
    } else if options.force_portable_lock {
        vec![LockVariant {
            flavor: LockFlavor::Portable,
            predicate: None,
        }]
    } else {
        vec![
            LockVariant {
                flavor: LockFlavor::Fast,
                predicate: Some(CfgPredicate::new(quote!(any(unix, windows)))),
            },
            LockVariant {
                flavor: LockFlavor::Portable,
                predicate: Some(CfgPredicate::new(quote!(not(any(unix, windows))))),
            },
        ]
    };
    ShapePlan { shape, variants }
}
