//! How generated code reaches the spy's mutable state.
//!
//! `Plain` spies keep one `Cell`/`RefCell` per field. Locked spies keep all
//! fields in one state aggregate and reach it through a critical section on
//! the lock handle, with the aggregate bound to `__spy_state`.

use crate::strategy::ConcurrencyShape;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Storage {
    Cells,
    Aggregate { isolated: bool },
}

impl Storage {
    pub fn for_shape(shape: ConcurrencyShape) -> Self {
        match shape {
            ConcurrencyShape::Plain => Self::Cells,
            ConcurrencyShape::LockedValue => Self::Aggregate { isolated: false },
            ConcurrencyShape::IsolatedLockedUnit => Self::Aggregate { isolated: true },
        }
    }

    pub fn is_isolated(self) -> bool {
        matches!(self, Self::Aggregate { isolated: true })
    }

    pub fn counter_decl(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(#field: ::std::cell::Cell<usize>),
            Self::Aggregate { .. } => quote!(#field: usize),
        }
    }

    pub fn field_decl(self, field: &Ident, ty: &TokenStream) -> TokenStream {
        match self {
            Self::Cells => quote!(#field: ::std::cell::RefCell<#ty>),
            Self::Aggregate { .. } => quote!(#field: #ty),
        }
    }

    pub fn increment(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(self.#field.set(self.#field.get() + 1);),
            Self::Aggregate { .. } => quote!(__spy_state.#field += 1;),
        }
    }

    pub fn counter(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(self.#field.get()),
            Self::Aggregate { .. } => quote!(__spy_state.#field),
        }
    }

    pub fn reset_counter(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(self.#field.set(0);),
            Self::Aggregate { .. } => quote!(__spy_state.#field = 0;),
        }
    }

    /// Shared access to a non-counter field.
    pub fn borrowed(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(self.#field.borrow()),
            Self::Aggregate { .. } => quote!(__spy_state.#field),
        }
    }

    /// Exclusive access to a non-counter field.
    pub fn borrowed_mut(self, field: &Ident) -> TokenStream {
        match self {
            Self::Cells => quote!(self.#field.borrow_mut()),
            Self::Aggregate { .. } => quote!(__spy_state.#field),
        }
    }

    pub fn assign(self, field: &Ident, value: TokenStream) -> TokenStream {
        match self {
            Self::Cells => quote!(*self.#field.borrow_mut() = #value;),
            Self::Aggregate { .. } => quote!(__spy_state.#field = #value;),
        }
    }

    /// An expression evaluated with access to the state.
    pub fn critical_expr(self, expr: TokenStream) -> TokenStream {
        match self {
            Self::Cells => expr,
            Self::Aggregate { .. } => quote!(self.state.with_lock(|__spy_state| #expr)),
        }
    }

    /// A block of statements ending in a value, evaluated with access to the state.
    pub fn critical_block(self, body: TokenStream) -> TokenStream {
        match self {
            Self::Cells => quote!({ #body }),
            Self::Aggregate { .. } => quote!(self.state.with_lock(|__spy_state| { #body })),
        }
    }

    /// Statements executed with access to the state.
    pub fn critical_stmts(self, body: TokenStream) -> TokenStream {
        match self {
            Self::Cells => body,
            Self::Aggregate { .. } => quote!(self.state.with_lock(|__spy_state| { #body });),
        }
    }

    pub fn pointer(self) -> TokenStream {
        match self {
            Self::Cells => quote!(::std::rc::Rc),
            Self::Aggregate { .. } => quote!(::std::sync::Arc),
        }
    }

    /// Auto-trait bounds handlers must satisfy, each followed by `+`.
    pub fn thread_bounds(self) -> TokenStream {
        match self {
            Self::Cells => quote!(),
            Self::Aggregate { .. } => quote!(Send + Sync +),
        }
    }

    pub fn future_bounds(self) -> TokenStream {
        match self {
            Self::Cells => quote!(),
            Self::Aggregate { .. } => quote!(Send +),
        }
    }

    pub fn boxed_future(self, output: &TokenStream) -> TokenStream {
        match self {
            Self::Cells => quote!(::spygen::runtime::LocalBoxFuture<#output>),
            Self::Aggregate { .. } => quote!(::spygen::runtime::BoxFuture<#output>),
        }
    }

    /// The stored handler type.
    pub fn handler_type(self, inputs: &[Type], output: Option<&Type>, may_wait: bool) -> TokenStream {
        let pointer = self.pointer();
        let auto = match self {
            Self::Cells => quote!(),
            Self::Aggregate { .. } => quote!(+ Send + Sync),
        };
        let arrow = if may_wait {
            let output = output.map_or_else(|| quote!(()), |ty| quote!(#ty));
            let future = self.boxed_future(&output);
            quote!(-> #future)
        } else {
            output.map_or_else(TokenStream::new, |ty| quote!(-> #ty))
        };
        quote!(#pointer<dyn Fn(#(#inputs),*) #arrow #auto>)
    }
}
