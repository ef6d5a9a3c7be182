use sagaguard_core::capability::CapabilityResolver;
use sagaguard_core::config::SagaGuardConfig;
use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::{simple_name, GraphError, TypeDeclaration};

use crate::rules::RuleId;
use crate::types::{Diagnostic, FixState, FixSuggestion};

/// Generate a fix state for each diagnostic, in input order.
///
/// Only RULE-SAGA-CLASS has a structural fix; every other rule gets a
/// descriptive message and no edit.
pub fn generate_fix_plans(
    diagnostics: &[&Diagnostic],
    graph: &TypeGraph,
    config: &SagaGuardConfig,
) -> Vec<FixState> {
    diagnostics
        .iter()
        .map(|d| suggest_fix(d, graph, config))
        .collect()
}

pub fn suggest_fix(d: &Diagnostic, graph: &TypeGraph, config: &SagaGuardConfig) -> FixState {
    match d.code {
        RuleId::SagaClass => generate_saga_capability_fix(d, graph, config),
        RuleId::MessageType => no_fix(
            d,
            format!(
                "Navigate to message type `{}` and implement `{}`",
                d.args.first().map(String::as_str).unwrap_or("?"),
                config.capabilities.message,
            ),
        ),
        RuleId::RetryOn | RuleId::NonRetryable => no_fix(
            d,
            format!(
                "Replace `{}` with a type derived from `{}`",
                d.args.first().map(String::as_str).unwrap_or("?"),
                config.failure_base_type,
            ),
        ),
        RuleId::MultiPivot => no_fix(
            d,
            format!(
                "Clear the pivot flag on all but one step of `{}`",
                d.type_name
            ),
        ),
    }
}

fn no_fix(d: &Diagnostic, message: String) -> FixState {
    FixState::NoFixAvailable {
        code: d.code,
        target: d.type_name.clone(),
        message,
    }
}

/// RULE-SAGA-CLASS: append the saga capability to the declared capability list.
fn generate_saga_capability_fix(
    d: &Diagnostic,
    graph: &TypeGraph,
    config: &SagaGuardConfig,
) -> FixState {
    let capability = config.capabilities.saga.as_str();
    let Some(decl) = graph.get(&d.type_name) else {
        return no_fix(d, format!("Type `{}` is not in the graph", d.type_name));
    };
    if CapabilityResolver::new(graph).has_capability(decl, capability) {
        return no_fix(
            d,
            format!("`{}` already has `{}`", decl.simple_name(), capability),
        );
    }

    let old_capabilities = decl.capabilities.clone();
    let mut new_capabilities = old_capabilities.clone();
    new_capabilities.push(capability.to_string());

    FixState::FixAvailable(FixSuggestion {
        code: d.code,
        target: decl.name.clone(),
        capability: capability.to_string(),
        creates_list: old_capabilities.is_empty(),
        old_capabilities,
        new_capabilities,
        anchor: decl.name_span.clone(),
        description: format!("Implement `{}` on `{}`", capability, decl.simple_name()),
    })
}

impl FixSuggestion {
    /// Apply the edit to `decl`, returning the updated declaration.
    ///
    /// Set semantics: if `decl` already lists the capability, or is not the
    /// fix target, it comes back unchanged.
    pub fn apply(&self, decl: &TypeDeclaration) -> TypeDeclaration {
        let mut updated = decl.clone();
        if decl.name == self.target && !decl.declares_capability(&self.capability) {
            updated.capabilities.push(self.capability.clone());
        }
        updated
    }
}

/// Apply fixes to a copy of `graph`; the input snapshot is left untouched.
pub fn apply_fixes(graph: &TypeGraph, fixes: &[FixSuggestion]) -> Result<TypeGraph, GraphError> {
    let mut declarations = graph.declarations().to_vec();
    for fix in fixes {
        let decl = declarations
            .iter_mut()
            .find(|d| d.name == fix.target)
            .ok_or_else(|| GraphError::TypeNotFound(fix.target.clone()))?;
        *decl = fix.apply(decl);
    }
    TypeGraph::new(declarations)
}

/// Count how many times `capability` occurs in a list, by simple name.
pub fn capability_occurrences(capabilities: &[String], capability: &str) -> usize {
    let wanted = simple_name(capability);
    capabilities
        .iter()
        .filter(|c| simple_name(c) == wanted)
        .count()
}
