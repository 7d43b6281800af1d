//! Configuration loaded from `.spygen.toml`.

mod core;
mod loader;

pub use core::{default_header, GeneratorOptions, OutputConfig, SpygenConfig};
pub use loader::{
    default_config_toml, directory_ancestors, discover_config, load_config, load_config_file,
    parse_config, CONFIG_FILE_NAME,
};
