use super::{load_source, select_items};
use crate::cli::InspectFormat;
use crate::config::load_config;
use crate::errors::{Diagnostics, SpygenError};
use crate::observability::set_current_file;
use crate::pipeline::analyze;
use crate::report::DeclarationReport;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub file: PathBuf,
    pub format: InspectFormat,
    pub item: Option<String>,
    pub config: Option<PathBuf>,
}

/// Prints the report of every selected trait.
pub fn inspect(config: InspectConfig) -> Result<()> {
    println!("{}", inspect_to_string(&config)?);
    Ok(())
}

pub fn inspect_to_string(config: &InspectConfig) -> Result<String> {
    let _file = set_current_file(&config.file);
    let spygen_config = load_config(config.config.as_deref(), &config.file)?;
    let source = load_source(&config.file)?;
    let selected = select_items(&source, &config.file, config.item.as_deref())?;

    let mut reports = Vec::new();
    let mut diagnostics = Diagnostics::new();
    for (_, item) in selected {
        match analyze(item, &spygen_config.generator) {
            Ok(analysis) => reports.push(DeclarationReport::from_analysis(&analysis)),
            Err(errors) => diagnostics.extend(errors),
        }
    }
    let reports = diagnostics
        .finish(reports)
        .map_err(|diagnostics| SpygenError::generation(&config.file, &diagnostics))?;

    Ok(match config.format {
        InspectFormat::Json => serde_json::to_string_pretty(&reports)?,
        InspectFormat::Yaml => serde_yaml::to_string(&reports)?,
    })
}
