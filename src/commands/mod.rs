//! CLI command implementations.
//!
//! - **generate**: expand `#[spy]` traits into spy source
//! - **inspect**: print the extracted model of each trait
//! - **init**: write a default `.spygen.toml`

pub mod generate;
pub mod init;
pub mod inspect;

pub use generate::{generate, render_output, GenerateConfig};
pub use init::{init_config, init_config_in};
pub use inspect::{inspect, InspectConfig};

use crate::errors::{ErrorCode, SpygenError};
use crate::guard::item_name;
use crate::observability::{set_phase, GenerationPhase};
use crate::pipeline::{collect_decorated, located_items};
use proc_macro2::Ident;
use std::path::Path;
use syn::Item;

/// Reads and parses a Rust source file.
pub fn load_source(path: &Path) -> Result<syn::File, SpygenError> {
    let _phase = set_phase(GenerationPhase::Parsing);
    let _span = tracing::info_span!("parse_file", path = %path.display()).entered();

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SpygenError::io(ErrorCode::IO_READ, path, e))?;
    syn::parse_file(&contents).map_err(|e| SpygenError::parse(path, &e))
}

/// The items a command works on: the named one, or every decorated item.
pub(crate) fn select_items<'a>(
    file: &'a syn::File,
    path: &Path,
    name: Option<&str>,
) -> Result<Vec<(Vec<Ident>, &'a Item)>, SpygenError> {
    match name {
        Some(name) => {
            let selected: Vec<_> = located_items(file)
                .into_iter()
                .filter(|(_, item)| item_name(item).as_deref() == Some(name))
                .collect();
            if selected.is_empty() {
                Err(SpygenError::item_not_found(name, path))
            } else {
                Ok(selected)
            }
        }
        None => Ok(collect_decorated(file)),
    }
}
