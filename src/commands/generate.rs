use super::{load_source, select_items};
use crate::config::{load_config, OutputConfig};
use crate::errors::{ErrorCode, SpygenError};
use crate::observability::{set_current_file, set_phase, set_progress, GenerationPhase};
use crate::pipeline::{expand_all, Expansion, LocatedItem};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub force_portable_lock: bool,
    pub config: Option<PathBuf>,
    pub item: Option<String>,
}

/// Expands the selected traits and writes the spies to the output.
///
/// Nothing is written when any item fails to expand.
pub fn generate(config: GenerateConfig) -> Result<()> {
    let _file = set_current_file(&config.file);
    let spygen_config = load_config(config.config.as_deref(), &config.file)?
        .with_overrides(config.force_portable_lock);

    let source = load_source(&config.file)?;
    let selected = select_items(&source, &config.file, config.item.as_deref())?;
    if selected.is_empty() {
        tracing::warn!("No #[spy] items found in {}", config.file.display());
    }

    set_progress(0, selected.len());
    let located = selected.iter().map(|(path, item)| LocatedItem {
        module_path: path,
        item: *item,
    });
    let expansions = expand_all(located, &spygen_config.generator)
        .map_err(|diagnostics| SpygenError::generation(&config.file, &diagnostics))?;

    let rendered = render_output(&spygen_config.output, &expansions)?;

    let _phase = set_phase(GenerationPhase::Output);
    match &config.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .map_err(|e| SpygenError::io(ErrorCode::IO_WRITE, path, e))?;
            tracing::info!(
                spies = expansions.len(),
                "Wrote {}",
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Joins the expansions into one file, headed by the configured line.
pub fn render_output(output: &OutputConfig, expansions: &[(LocatedItem<'_>, Expansion)]) -> Result<String> {
    let _phase = set_phase(GenerationPhase::Rendering);

    let mut items = Vec::new();
    for (located, expansion) in expansions {
        if let Some(import) = located.import() {
            let import: syn::Item =
                syn::parse2(import).context("Failed to build import for nested trait")?;
            items.push(import);
        }
        items.extend(expansion.file.items.iter().cloned());
    }

    let file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items,
    };
    let body = if output.pretty {
        crate::emit::render::pretty(&file)
    } else {
        let mut text = quote::ToTokens::to_token_stream(&file).to_string();
        text.push('\n');
        text
    };

    if output.header.is_empty() {
        Ok(body)
    } else {
        Ok(format!("{}\n\n{body}", output.header))
    }
}
