//! Narrow a violation to the most specific span the host supplied.
//!
//! Fallback order: rule-specific token, argument span, attribute application,
//! owning type's name token.

use sagaguard_core::types::{AttributeInstance, Span, TypeDeclaration};

use crate::types::{Location, Precision};

#[derive(Debug, Clone, Copy, Default)]
pub struct Anchor<'a> {
    pub token: Option<&'a Span>,
    pub argument: Option<&'a Span>,
    pub attribute: Option<&'a Span>,
    pub type_name: Option<&'a Span>,
}

impl<'a> Anchor<'a> {
    /// Anchor on `decl`, with no narrower candidates yet.
    pub fn for_type(decl: &'a TypeDeclaration) -> Self {
        Self {
            type_name: decl.name_span.as_ref(),
            ..Self::default()
        }
    }

    pub fn attribute(mut self, attr: Option<&'a AttributeInstance>) -> Self {
        self.attribute = attr.and_then(|a| a.span.as_ref());
        self
    }

    pub fn argument(mut self, span: Option<&'a Span>) -> Self {
        self.argument = span;
        self
    }

    pub fn token(mut self, span: Option<&'a Span>) -> Self {
        self.token = span;
        self
    }

    pub fn resolve(&self) -> Location {
        let chain = [
            (self.token, Precision::Token),
            (self.argument, Precision::Argument),
            (self.attribute, Precision::Attribute),
            (self.type_name, Precision::TypeName),
        ];
        chain
            .into_iter()
            .find_map(|(span, precision)| {
                span.map(|s| Location {
                    precision,
                    span: Some(s.clone()),
                })
            })
            .unwrap_or_else(Location::unanchored)
    }
}
