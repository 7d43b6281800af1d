//! The expansion pipeline.
//!
//! One decorated item flows through the phases in a fixed order:
//! guard, extraction, disambiguation, projection, strategy selection,
//! emission and rendering. Each phase runs inside its own `tracing` span
//! and marks the thread-local generation context for crash reports.
//! Nothing is cached between expansions, so the same item always expands
//! to the same tokens.

use crate::config::GeneratorOptions;
use crate::disambiguate::{disambiguate, NameTable};
use crate::emit::{emit, render};
use crate::errors::{Diagnostic, Diagnostics, ErrorCode};
use crate::extract::extract;
use crate::guard::{ensure_trait, has_spy_marker, item_attributes, item_name};
use crate::model::InterfaceDeclaration;
use crate::observability::{
    increment_expanded, set_current_declaration, set_phase, GenerationPhase,
};
use crate::project::{project, Projection};
use crate::strategy::{plan, ConcurrencyShape, ShapePlan};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{Item, ItemTrait};
use tracing::{debug, info_span};

/// Everything known about a declaration before any code is emitted.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub declaration: InterfaceDeclaration,
    pub names: NameTable,
    pub projection: Projection,
    pub plan: ShapePlan,
}

/// The generated spy for one declaration.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub spy_name: String,
    pub shape: ConcurrencyShape,
    pub tokens: TokenStream,
    pub file: syn::File,
}

impl Expansion {
    /// Formatted Rust source of the spy.
    pub fn to_source(&self) -> String {
        let _phase = set_phase(GenerationPhase::Rendering);
        render::pretty(&self.file)
    }
}

/// Runs every phase up to strategy selection.
pub fn analyze(item: &Item, options: &GeneratorOptions) -> Result<Analysis, Diagnostics> {
    let item_trait = guard(item)?;
    analyze_trait(item_trait, options)
}

fn guard(item: &Item) -> Result<&ItemTrait, Diagnostics> {
    let _phase = set_phase(GenerationPhase::Guard);
    let _span = info_span!("guard").entered();
    ensure_trait(item).map_err(Diagnostics::from)
}

fn analyze_trait(item: &ItemTrait, options: &GeneratorOptions) -> Result<Analysis, Diagnostics> {
    let name = item.ident.to_string();
    let _declaration = set_current_declaration(name.as_str());

    let declaration = {
        let _phase = set_phase(GenerationPhase::Extraction);
        let _span = info_span!("extraction", declaration = %name).entered();
        extract(item)?
    };

    let names = {
        let _phase = set_phase(GenerationPhase::Disambiguation);
        let _span = info_span!("disambiguation", declaration = %name).entered();
        disambiguate(&declaration.members)
    };

    let projection = {
        let _phase = set_phase(GenerationPhase::Projection);
        let _span = info_span!("projection", declaration = %name).entered();
        project(&declaration)
    };

    let plan = {
        let _phase = set_phase(GenerationPhase::StrategySelection);
        let _span = info_span!("strategy_selection", declaration = %name).entered();
        plan(&declaration.markers, options)
    };

    Ok(Analysis {
        declaration,
        names,
        projection,
        plan,
    })
}

/// Expands one decorated item into its spy.
pub fn expand(item: &Item, options: &GeneratorOptions) -> Result<Expansion, Diagnostics> {
    let analysis = analyze(item, options)?;
    expand_analysis(&analysis)
}

/// Emits and validates the spy for an already analyzed declaration.
pub fn expand_analysis(analysis: &Analysis) -> Result<Expansion, Diagnostics> {
    let declaration = &analysis.declaration;
    let _declaration = set_current_declaration(declaration.name.to_string());

    let tokens = {
        let _phase = set_phase(GenerationPhase::Emission);
        let _span = info_span!("emission", declaration = %declaration.name).entered();
        emit(
            declaration,
            &analysis.names,
            &analysis.projection,
            &analysis.plan,
        )
    };

    let file = render::validate(&tokens).map_err(|error| {
        Diagnostic::new(
            ErrorCode::INVALID_OUTPUT,
            Span::call_site(),
            format!(
                "generated spy for `{}` is not valid Rust: {error}",
                declaration.name
            ),
        )
    })?;

    let spy_name = declaration.spy_ident().to_string();
    debug!(spy = %spy_name, shape = ?analysis.plan.shape, "Expanded spy");

    Ok(Expansion {
        spy_name,
        shape: analysis.plan.shape,
        tokens,
        file,
    })
}

/// Expands an item straight to formatted source.
pub fn generate_source(item: &Item, options: &GeneratorOptions) -> Result<String, Diagnostics> {
    expand(item, options).map(|expansion| expansion.to_source())
}

/// An item found in a parsed file, with the inline modules enclosing it.
#[derive(Debug, Clone, Copy)]
pub struct LocatedItem<'a> {
    pub module_path: &'a [Ident],
    pub item: &'a Item,
}

impl LocatedItem<'_> {
    pub fn name(&self) -> Option<String> {
        item_name(self.item)
    }

    /// `use a::b::*;` for traits nested in inline modules, so the spy can
    /// name its trait and every type the trait's signatures mention from the
    /// file's top level. Items declared at the top level shadow the glob.
    pub fn import(&self) -> Option<TokenStream> {
        if self.module_path.is_empty() || !matches!(self.item, Item::Trait(_)) {
            return None;
        }
        let modules = self.module_path;
        Some(quote! {
            #[cfg(test)]
            #[allow(unused_imports)]
            use #(#modules::)* *;
        })
    }
}

/// Every item in the file, depth first, together with its module path.
pub fn located_items(file: &syn::File) -> Vec<(Vec<Ident>, &Item)> {
    let mut found = Vec::new();
    walk(&file.items, &mut Vec::new(), &mut found);
    found
}

fn walk<'a>(items: &'a [Item], path: &mut Vec<Ident>, found: &mut Vec<(Vec<Ident>, &'a Item)>) {
    for item in items {
        found.push((path.clone(), item));
        if let Item::Mod(module) = item {
            if let Some((_, nested)) = &module.content {
                path.push(module.ident.clone());
                walk(nested, path, found);
                path.pop();
            }
        }
    }
}

/// Items carrying the `#[spy]` marker, including those in inline modules.
pub fn collect_decorated(file: &syn::File) -> Vec<(Vec<Ident>, &Item)> {
    located_items(file)
        .into_iter()
        .filter(|(_, item)| has_spy_marker(item_attributes(item)))
        .collect()
}

/// Expands several items, gathering every diagnostic before failing.
pub fn expand_all<'a>(
    items: impl IntoIterator<Item = LocatedItem<'a>>,
    options: &GeneratorOptions,
) -> Result<Vec<(LocatedItem<'a>, Expansion)>, Diagnostics> {
    let mut expansions = Vec::new();
    let mut diagnostics = Diagnostics::new();

    for located in items {
        match expand(located.item, options) {
            Ok(expansion) => {
                increment_expanded();
                expansions.push((located, expansion));
            }
            Err(errors) => diagnostics.extend(errors),
        }
    }

    diagnostics.finish(expansions)
}
