use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use crate::errors::{ErrorCode, SpygenError};
use anyhow::Result;
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<(), SpygenError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        return Err(SpygenError::config(
            ErrorCode::CONFIG_EXISTS,
            "Configuration file already exists. Use --force to overwrite.",
            Some(config_path),
        ));
    }

    std::fs::write(&config_path, default_config_toml())
        .map_err(|e| SpygenError::io(ErrorCode::IO_WRITE, &config_path, e))
}
