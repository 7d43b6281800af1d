//! Identifiers of generated fields and accessors.

use crate::model::{MemberDeclaration, MemberKind};
use proc_macro2::{Ident, Span};

/// An identifier, raw when `name` is a keyword.
pub(crate) fn ident(name: &str) -> Ident {
    if syn::parse_str::<Ident>(name).is_ok() {
        Ident::new(name, Span::call_site())
    } else {
        Ident::new_raw(name, Span::call_site())
    }
}

/// Names derived from one member's disambiguated stem.
pub(crate) struct MemberIdents<'a> {
    stem: &'a str,
}

impl<'a> MemberIdents<'a> {
    pub fn new(stem: &'a str) -> Self {
        Self { stem }
    }

    pub fn call_count(&self) -> Ident {
        ident(&format!("{}_call_count", self.stem))
    }

    pub fn called(&self) -> Ident {
        ident(&format!("{}_called", self.stem))
    }

    pub fn received_arguments(&self) -> Ident {
        ident(&format!("{}_received_arguments", self.stem))
    }

    pub fn received_invocations(&self) -> Ident {
        ident(&format!("{}_received_invocations", self.stem))
    }

    pub fn handler(&self) -> Ident {
        ident(&format!("{}_handler", self.stem))
    }

    pub fn set_handler(&self) -> Ident {
        ident(&format!("set_{}_handler", self.stem))
    }

    pub fn entries(&self) -> Ident {
        ident(&format!("{}_entries", self.stem))
    }

    /// Backing state of a property; optional properties store themselves.
    pub fn backing(&self, optional: bool) -> Ident {
        if optional {
            ident(self.stem)
        } else {
            ident(&format!("underlying_{}", self.stem))
        }
    }

    pub fn stub(&self) -> Ident {
        ident(&format!("stub_{}", self.stem))
    }

    /// Every field and accessor identifier the member's templates emit.
    pub fn claimed(&self, member: &MemberDeclaration) -> Vec<(Namespace, String)> {
        let mut fields = Vec::new();
        let mut accessors = Vec::new();
        match &member.kind {
            MemberKind::Method(method) => {
                fields.extend([self.call_count(), self.handler()]);
                accessors.extend([self.call_count(), self.called(), self.set_handler()]);
                if !method.parameters.is_empty() {
                    fields.push(self.received_invocations());
                    accessors.extend([self.received_arguments(), self.received_invocations()]);
                }
            }
            MemberKind::Property(property) => {
                fields.push(self.backing(property.optional));
                accessors.push(self.stub());
            }
            MemberKind::Subscript(_) => {
                fields.extend([self.call_count(), self.received_invocations(), self.entries()]);
                accessors.extend([
                    self.call_count(),
                    self.called(),
                    self.received_arguments(),
                    self.received_invocations(),
                    self.stub(),
                ]);
            }
        }

        let fields = fields
            .into_iter()
            .map(|field| (Namespace::Field, field.to_string()));
        let accessors = accessors
            .into_iter()
            .map(|accessor| (Namespace::Accessor, accessor.to_string()));
        fields.chain(accessors).collect()
    }
}

/// Where a generated identifier lives: state fields and inherent methods
/// never collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Namespace {
    Field,
    Accessor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_become_raw_identifiers() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("fetch_user").to_string(), "fetch_user");
    }

    #[test]
    fn test_member_names() {
        let names = MemberIdents::new("set_bool_string");
        assert_eq!(names.call_count().to_string(), "set_bool_string_call_count");
        assert_eq!(names.set_handler().to_string(), "set_set_bool_string_handler");
        assert_eq!(names.backing(false).to_string(), "underlying_set_bool_string");
        assert_eq!(names.backing(true).to_string(), "set_bool_string");
    }

    #[test]
    fn test_parameterless_methods_claim_no_log() {
        let item: syn::ItemTrait = syn::parse_quote! {
            trait Clock {
                fn tick(&self);
            }
        };
        let declaration = crate::extract::extract(&item).unwrap();
        let claimed = MemberIdents::new("tick").claimed(&declaration.members[0]);
        assert_eq!(claimed.len(), 5);
        assert!(claimed.contains(&(Namespace::Field, "tick_handler".to_string())));
        assert!(claimed.contains(&(Namespace::Accessor, "set_tick_handler".to_string())));
        assert!(!claimed.iter().any(|(_, name)| name.contains("received")));
    }
}
