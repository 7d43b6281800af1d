//! Serializable summaries of an analysis, printed by `spygen inspect`.

use crate::disambiguate::GeneratedName;
use crate::model::{AccessTier, CapabilityMarker, Effects, MemberKind, MemberKindTag};
use crate::pipeline::Analysis;
use crate::project::{MemberProjection, ReturnProjection};
use crate::strategy::{ConcurrencyShape, LockFlavor};
use quote::ToTokens;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DeclarationReport {
    pub name: String,
    pub spy: String,
    pub access: AccessTier,
    pub markers: Vec<CapabilityMarker>,
    pub shape: ConcurrencyShape,
    pub lock_flavors: Vec<LockFlavor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub associated_types: Vec<AssociatedTypeReport>,
    pub members: Vec<MemberReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssociatedTypeReport {
    pub name: String,
    pub alias: String,
    pub erased: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberReport {
    pub kind: MemberKindTag,
    pub declared_name: String,
    pub generated: GeneratedName,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cfg: Vec<String>,
    pub effects: Effects,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterReport {
    pub binding: String,
    pub declared: String,
    pub logged_as: String,
    pub erased: bool,
}

/// Renders tokens the way they are usually written.
pub fn type_text(tokens: impl ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace("& ", "&")
        .replace(" ,", ",")
        .replace("( ", "(")
        .replace(" )", ")")
}

impl DeclarationReport {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let declaration = &analysis.declaration;
        let members = declaration
            .members
            .iter()
            .zip(&analysis.projection.members)
            .zip(analysis.names.iter())
            .map(|((member, projected), generated)| {
                let mut report = MemberReport {
                    kind: member.tag(),
                    declared_name: member.declared_name().to_string(),
                    generated: generated.clone(),
                    cfg: member.cfg.iter().map(|p| p.as_str().to_string()).collect(),
                    effects: member.effects(),
                    parameters: Vec::new(),
                    returns: member.return_type().map(type_text),
                    log_type: None,
                    handler_output: None,
                    settable: None,
                    optional: None,
                };
                match (projected, &member.kind) {
                    (MemberProjection::Method(method), _) => {
                        report.parameters = method
                            .arguments
                            .iter()
                            .map(|argument| ParameterReport {
                                binding: argument.binding.to_string(),
                                declared: type_text(&argument.declared),
                                logged_as: type_text(&argument.log_type),
                                erased: argument.erased.is_some(),
                            })
                            .collect();
                        report.log_type = method.log_type.as_ref().map(type_text);
                        report.handler_output = match &method.returns {
                            ReturnProjection::Unit => None,
                            other => other.handler_output().map(type_text),
                        };
                    }
                    (MemberProjection::Property(property), MemberKind::Property(declared)) => {
                        report.settable = Some(property.setter.is_some());
                        report.optional = Some(declared.optional);
                        report.log_type = Some(type_text(&property.value_type));
                    }
                    (MemberProjection::Subscript(subscript), MemberKind::Subscript(declared)) => {
                        report.parameters = subscript
                            .indices
                            .iter()
                            .map(|index| ParameterReport {
                                binding: index.binding.to_string(),
                                declared: type_text(&index.declared),
                                logged_as: type_text(&index.log_type),
                                erased: index.erased.is_some(),
                            })
                            .collect();
                        report.settable = Some(subscript.setter.is_some());
                        report.optional = Some(declared.optional);
                        report.log_type = Some(type_text(&subscript.key_type));
                    }
                    _ => {}
                }
                report
            })
            .collect();

        Self {
            name: declaration.name.to_string(),
            spy: declaration.spy_ident().to_string(),
            access: declaration.access,
            markers: declaration.markers.clone(),
            shape: analysis.plan.shape,
            lock_flavors: analysis.plan.flavors(),
            associated_types: analysis
                .projection
                .associated
                .iter()
                .map(|binding| AssociatedTypeReport {
                    name: binding.name.to_string(),
                    alias: type_text(&binding.alias),
                    erased: binding.erased,
                })
                .collect(),
            members,
        }
    }
}
