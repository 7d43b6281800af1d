use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::SpygenConfig;
use crate::errors::{ErrorCode, SpygenError};

pub const CONFIG_FILE_NAME: &str = ".spygen.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses `.spygen.toml` contents.
pub fn parse_config(contents: &str) -> Result<SpygenConfig, SpygenError> {
    toml::from_str::<SpygenConfig>(contents).map_err(|e| {
        SpygenError::config(
            ErrorCode::CONFIG_INVALID,
            format!("Failed to parse {CONFIG_FILE_NAME}: {e}"),
            None,
        )
    })
}

/// Loads an explicitly requested config file; failures are errors.
pub fn load_config_file(path: &Path) -> Result<SpygenConfig, SpygenError> {
    let contents = read_config_file(path)
        .map_err(|e| SpygenError::io(ErrorCode::IO_READ, path, e))?;
    parse_config(&contents).map_err(|e| match e {
        SpygenError::Config { code, message, .. } => {
            SpygenError::config(code, message, Some(path.to_path_buf()))
        }
        other => other,
    })
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<SpygenConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Missing files are the normal case while walking up the tree.
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Finds `.spygen.toml` in `start` or one of its ancestors, falling back to defaults.
pub fn discover_config(start: &Path) -> SpygenConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SpygenConfig::default()
        })
}

/// Config for an input file: an explicit path wins, otherwise discovery
/// starts at the input's directory.
pub fn load_config(explicit: Option<&Path>, input: &Path) -> Result<SpygenConfig, SpygenError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let start = input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok());

    Ok(match start {
        Some(dir) => discover_config(&dir),
        None => {
            tracing::warn!("Failed to determine a directory to search for {CONFIG_FILE_NAME}. Using default config.");
            SpygenConfig::default()
        }
    })
}

/// Default file contents written by `spygen init`.
pub fn default_config_toml() -> String {
    let config = SpygenConfig::default();
    let body = toml::to_string_pretty(&config).unwrap_or_default();
    format!("# spygen configuration\n\n{body}")
}
