use sagaguard_core::capability::CapabilityResolver;
use sagaguard_core::config::SagaGuardConfig;
use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::{
    AttributeInstance, AttributeKind, NamedArgument, TypeDeclaration, TypeKind,
};

use crate::location::Anchor;
use crate::pivot;
use crate::rules::RuleId;
use crate::types::Diagnostic;

pub const RETRY_ON_EXCEPTIONS: &str = "RetryOnExceptions";
pub const NON_RETRYABLE_EXCEPTIONS: &str = "NonRetryableExceptions";

/// Read-only inputs shared by every check in one pass.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'g> {
    pub graph: &'g TypeGraph,
    pub resolver: CapabilityResolver<'g>,
    pub config: &'g SagaGuardConfig,
}

impl<'g> RuleContext<'g> {
    pub fn new(graph: &'g TypeGraph, config: &'g SagaGuardConfig) -> Self {
        Self {
            graph,
            resolver: CapabilityResolver::new(graph),
            config,
        }
    }
}

/// All marker diagnostics for one declaration, in marker order, followed by
/// the pivot multiplicity check.
pub fn check_type(decl: &TypeDeclaration, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
    let mut violations = Vec::new();
    if decl.kind != TypeKind::Class {
        return violations;
    }

    let mut saga_checked = false;

    for attr in &decl.attributes {
        match attr.kind {
            AttributeKind::Step => {
                if !saga_checked {
                    saga_checked = true;
                    violations.extend(check_saga_class(decl, attr, ctx));
                }
                violations.extend(check_message_type(decl, attr, ctx));
            }
            AttributeKind::RetryPolicy => {
                violations.extend(check_retry_policy(decl, attr, ctx));
            }
            AttributeKind::Other => {}
        }
    }

    violations.extend(pivot::check_multiple_pivots(decl));
    violations
}

/// RULE-SAGA-CLASS: a type carrying step markers must implement the saga capability.
pub fn check_saga_class(
    decl: &TypeDeclaration,
    attr: &AttributeInstance,
    ctx: &RuleContext<'_>,
) -> Option<Diagnostic> {
    let capabilities = &ctx.config.capabilities;
    if ctx.resolver.has_capability(decl, &capabilities.saga) {
        return None;
    }
    let location = Anchor::for_type(decl)
        .token(decl.name_span.as_ref())
        .attribute(Some(attr))
        .resolve();
    Some(Diagnostic::new(
        RuleId::SagaClass,
        &decl.name,
        vec![decl.simple_name().to_string()],
        location,
    ))
}

/// RULE-MSG-TYPE: the step's message type must implement the message capability.
///
/// Skips silently when the first positional argument is absent, is not a type
/// reference, or names a type the graph doesn't declare.
pub fn check_message_type(
    decl: &TypeDeclaration,
    attr: &AttributeInstance,
    ctx: &RuleContext<'_>,
) -> Option<Diagnostic> {
    let arg = attr.positional.first()?;
    let type_ref = arg.value.as_type()?;
    let message = ctx.graph.get(&type_ref.name)?;

    let capabilities = &ctx.config.capabilities;
    if ctx.resolver.has_capability(message, &capabilities.message) {
        return None;
    }
    let location = Anchor::for_type(decl)
        .token(type_ref.span.as_ref())
        .argument(arg.span.as_ref())
        .attribute(Some(attr))
        .resolve();
    Some(Diagnostic::new(
        RuleId::MessageType,
        &decl.name,
        vec![message.simple_name().to_string()],
        location,
    ))
}

/// RULE-RETRY-ON and RULE-NON-RETRYABLE for one retry policy marker.
pub fn check_retry_policy(
    decl: &TypeDeclaration,
    attr: &AttributeInstance,
    ctx: &RuleContext<'_>,
) -> Vec<Diagnostic> {
    let mut violations = Vec::new();
    for (property, rule) in [
        (RETRY_ON_EXCEPTIONS, RuleId::RetryOn),
        (NON_RETRYABLE_EXCEPTIONS, RuleId::NonRetryable),
    ] {
        if let Some(arg) = attr.named_argument(property) {
            violations.extend(check_exception_list(decl, attr, arg, rule, ctx));
        }
    }
    violations
}

fn check_exception_list(
    decl: &TypeDeclaration,
    attr: &AttributeInstance,
    arg: &NamedArgument,
    rule: RuleId,
    ctx: &RuleContext<'_>,
) -> Vec<Diagnostic> {
    let Some(items) = arg.value.as_type_array() else {
        return Vec::new();
    };
    let base = ctx.config.failure_base_type.as_str();

    items
        .iter()
        .filter_map(|item| item.as_type())
        .filter(|element| match ctx.resolver.inherits_from(&element.name, base) {
            Some(derives) => !derives,
            None => {
                tracing::debug!(
                    type_name = %decl.name,
                    element = %element.name,
                    "skipping exception entry with unresolved base chain"
                );
                false
            }
        })
        .map(|element| {
            let location = Anchor::for_type(decl)
                .token(element.span.as_ref())
                .argument(arg.span.as_ref())
                .attribute(Some(attr))
                .resolve();
            Diagnostic::new(rule, &decl.name, vec![element.name.clone()], location)
        })
        .collect()
}

#[cfg(test)]
#[path = "violations_tests.rs"]
mod tests;
