//! Build-time spy generator for Rust traits.
//!
//! A trait marked `#[spy]` expands into a `<Trait>Spy` type that implements
//! the trait, records every call (count and arguments), delegates to
//! configurable handlers, and stores stubbed property and subscript values.
//! The spy's concurrency shape follows the trait's supertraits: plain
//! interior mutability, a locked aggregate for `Send`/`Sync` traits, or a
//! locked aggregate plus an isolation gate for `Isolated` traits.
//!
//! ```ignore
//! let item: syn::Item = syn::parse_str("#[spy] trait Clock { fn now(&self) -> u64; }")?;
//! let source = spygen::generate_source(&item, &spygen::GeneratorOptions::default())?;
//! ```
//!
//! Generated code refers to [`runtime`] through `::spygen::runtime`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod disambiguate;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod guard;
pub mod model;
pub mod observability;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod runtime;
pub mod sanitize;
pub mod strategy;

pub use crate::config::{GeneratorOptions, SpygenConfig};
pub use crate::errors::{Diagnostic, Diagnostics, ErrorCode, SpygenError};
pub use crate::extract::strip_helper_attributes;
pub use crate::pipeline::{analyze, expand, generate_source, Analysis, Expansion};
pub use crate::strategy::ConcurrencyShape;
