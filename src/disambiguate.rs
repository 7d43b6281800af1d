//! Overload disambiguation.
//!
//! Members are grouped by (kind, base name). Singleton groups keep the base
//! name; larger groups grow suffixes step by step until every member of the
//! group maps to a distinct generated identifier:
//!
//! 1. concatenated parameter type tokens,
//! 2. the return type token, for members that still collide,
//! 3. effect tokens, for members that still collide,
//! 4. a declaration-order ordinal as the last resort.
//!
//! Subscripts share the base `subscript` and always carry their index suffix.
//!
//! A final pass runs across groups: a resolved stem such as `set_bool` can
//! reproduce another member's base name, so every field and accessor a
//! member would emit is checked against the ones already claimed. Members
//! that kept their base name claim first; a member that clashes takes the
//! next free ordinal.

use crate::emit::naming::{MemberIdents, Namespace};
use crate::model::{MemberDeclaration, MemberKind, MemberKindTag};
use crate::sanitize::{effect_tokens, parameter_tokens, return_token, to_snake_case};
use quote::ToTokens;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use syn::ext::IdentExt;
use tracing::{debug, warn};

/// Base token shared by every subscript.
pub const SUBSCRIPT_BASE: &str = "subscript";

/// The identifier stem every generated artifact of one member is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedName {
    pub base: String,
    /// UpperCamel suffix, empty when the base name is kept verbatim.
    pub suffix: String,
    /// snake_case stem: the base, followed by the snake-cased suffix when present.
    pub stem: String,
}

impl GeneratedName {
    fn new(base: String, suffix: String) -> Self {
        let stem = if suffix.is_empty() {
            base.clone()
        } else {
            format!("{base}_{}", to_snake_case(&suffix))
        };
        Self { base, suffix, stem }
    }
}

/// Generated names, one per member, in member order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NameTable {
    names: Vec<GeneratedName>,
}

impl NameTable {
    pub fn get(&self, member: usize) -> Option<&GeneratedName> {
        self.names.get(member)
    }

    pub fn stem(&self, member: usize) -> &str {
        self.names.get(member).map_or("", |name| name.stem.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn base_name(member: &MemberDeclaration) -> String {
    match &member.kind {
        MemberKind::Method(method) => method.name.unraw().to_string(),
        MemberKind::Property(property) => property.name.unraw().to_string(),
        MemberKind::Subscript(_) => SUBSCRIPT_BASE.to_string(),
    }
}

/// Computes a distinct generated name for every member.
pub fn disambiguate(members: &[MemberDeclaration]) -> NameTable {
    let mut groups: BTreeMap<(MemberKindTag, String), Vec<usize>> = BTreeMap::new();
    for (index, member) in members.iter().enumerate() {
        groups
            .entry((member.tag(), base_name(member)))
            .or_default()
            .push(index);
    }

    let mut suffixes = vec![String::new(); members.len()];
    for ((tag, base), group) in &groups {
        if group.len() == 1 && *tag != MemberKindTag::Subscript {
            continue;
        }
        debug!(base = %base, size = group.len(), "Resolving overload group");
        for (index, suffix) in resolve_group(members, group) {
            suffixes[index] = suffix;
        }
    }

    settle_clashes(members, &mut suffixes);

    let names = members
        .iter()
        .zip(suffixes)
        .map(|(member, suffix)| GeneratedName::new(base_name(member), suffix))
        .collect();
    NameTable { names }
}

/// Renumbers members whose generated identifiers clash with another group's.
fn settle_clashes(members: &[MemberDeclaration], suffixes: &mut [String]) {
    let (verbatim, suffixed): (Vec<usize>, Vec<usize>) =
        (0..members.len()).partition(|&index| suffixes[index].is_empty());

    let mut claimed: HashSet<(Namespace, String)> = HashSet::new();
    for index in verbatim.into_iter().chain(suffixed) {
        let member = &members[index];
        let base = base_name(member);
        let resolved = suffixes[index].clone();
        let mut ordinal = 1;

        loop {
            let name = GeneratedName::new(base.clone(), suffixes[index].clone());
            let identifiers = MemberIdents::new(&name.stem).claimed(member);
            if identifiers.iter().all(|identifier| !claimed.contains(identifier)) {
                claimed.extend(identifiers);
                break;
            }
            ordinal += 1;
            suffixes[index] = format!("{resolved}{ordinal}");
            debug!(
                member = %member.declared_name(),
                stem = %name.stem,
                "Generated names clash with another member; numbering"
            );
        }
    }
}

fn resolve_group(members: &[MemberDeclaration], group: &[usize]) -> Vec<(usize, String)> {
    let mut suffixes: Vec<(usize, String)> = group
        .iter()
        .map(|&index| {
            let member = &members[index];
            let types = member.parameters().iter().map(|parameter| &parameter.ty);
            (index, parameter_tokens(types))
        })
        .collect();

    for colliding in colliding_positions(&suffixes) {
        let index = suffixes[colliding].0;
        suffixes[colliding]
            .1
            .push_str(&return_token(members[index].return_type()));
    }

    for colliding in colliding_positions(&suffixes) {
        let index = suffixes[colliding].0;
        suffixes[colliding]
            .1
            .push_str(&effect_tokens(members[index].effects()));
    }

    let still_colliding = colliding_positions(&suffixes);
    if !still_colliding.is_empty() {
        assign_ordinals(members, &mut suffixes, &still_colliding);
    }

    suffixes
}

/// Positions whose suffix equals another position's suffix.
fn colliding_positions(suffixes: &[(usize, String)]) -> Vec<usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, suffix) in suffixes {
        *counts.entry(suffix.as_str()).or_default() += 1;
    }
    suffixes
        .iter()
        .enumerate()
        .filter(|(_, (_, suffix))| counts.get(suffix.as_str()).copied().unwrap_or(0) > 1)
        .map(|(position, _)| position)
        .collect()
}

/// Appends `2`, `3`, ... in declaration order to every collision class
/// after its first member.
fn assign_ordinals(
    members: &[MemberDeclaration],
    suffixes: &mut [(usize, String)],
    colliding: &[usize],
) {
    let mut classes: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for &position in colliding {
        classes
            .entry(suffixes[position].1.clone())
            .or_default()
            .push(position);
    }

    for positions in classes.values() {
        let first = suffixes[positions[0]].0;
        for (ordinal, &position) in positions.iter().enumerate().skip(1) {
            let index = suffixes[position].0;
            if signature_text(&members[first]) == signature_text(&members[index]) {
                warn!(
                    member = %members[index].declared_name(),
                    "Identical signatures declared more than once; numbering generated names"
                );
            } else {
                debug!(
                    member = %members[index].declared_name(),
                    "Distinct signatures share sanitized tokens; numbering generated names"
                );
            }
            suffixes[position].1.push_str(&(ordinal + 1).to_string());
        }
    }
}

/// Normalized text of parameter types, return type and effects.
fn signature_text(member: &MemberDeclaration) -> String {
    let parameters: Vec<String> = member
        .parameters()
        .iter()
        .map(|parameter| parameter.ty.to_token_stream().to_string())
        .collect();
    let returned = member
        .return_type()
        .map(|ty| ty.to_token_stream().to_string())
        .unwrap_or_default();
    format!(
        "({}) -> {} [{}]",
        parameters.join(", "),
        returned,
        effect_tokens(member.effects())
    )
}
