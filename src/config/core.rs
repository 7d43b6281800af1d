use serde::{Deserialize, Serialize};

/// Options that change what the generator emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Emit a single `PortableLock` declaration instead of the
    /// `FastLock`/`PortableLock` pair gated by target.
    pub force_portable_lock: bool,
}

/// Output settings for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Line written at the top of generated files.
    pub header: String,
    /// Format with prettyplease; when false, raw token text is written.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            pretty: true,
        }
    }
}

pub fn default_header() -> String {
    "// @generated by spygen. Do not edit.".to_string()
}

/// Contents of `.spygen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpygenConfig {
    #[serde(default)]
    pub generator: GeneratorOptions,

    #[serde(default)]
    pub output: OutputConfig,
}

impl SpygenConfig {
    /// Applies command-line overrides; flags only ever switch options on.
    pub fn with_overrides(mut self, force_portable_lock: bool) -> Self {
        if force_portable_lock {
            self.generator.force_portable_lock = true;
        }
        self
    }
}
