use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use sagaguard_core::config::SagaGuardConfig;
use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::TypeDeclaration;

use crate::fix_generator;
use crate::suppress::SuppressionManager;
use crate::types::{
    Diagnostic, EnforceError, FixResult, FixState, ValidationResult, ValidationSummary,
};
use crate::violations::{self, RuleContext};

/// Cooperative cancellation flag polled between type declarations.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Validation engine. Holds configuration only; every pass is a pure
/// function of the graph it is given.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    pub(crate) config: SagaGuardConfig,
    pub(crate) suppressions: SuppressionManager,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine configured from a `SagaGuardConfig`.
    pub fn with_config(config: &SagaGuardConfig) -> Self {
        Self {
            config: config.clone(),
            suppressions: SuppressionManager::from_codes(&config.suppress),
        }
    }

    /// Suppress a specific rule code for this engine.
    pub fn suppress(&mut self, code: &str) -> bool {
        self.suppressions.suppress(code)
    }

    /// Validate every declaration, in graph order.
    pub fn validate(&self, graph: &TypeGraph) -> Vec<Diagnostic> {
        let ctx = RuleContext::new(graph, &self.config);
        let diagnostics: Vec<Diagnostic> = graph
            .declarations()
            .iter()
            .flat_map(|decl| self.check_declaration(decl, &ctx))
            .collect();
        tracing::debug!(
            types = graph.len(),
            diagnostics = diagnostics.len(),
            "validation pass complete"
        );
        diagnostics
    }

    /// Like [`validate`](Self::validate), polling `token` before each declaration.
    ///
    /// On cancellation the error carries whatever was produced so far; the
    /// caller decides whether to keep it.
    pub fn validate_with_cancel(
        &self,
        graph: &TypeGraph,
        token: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, EnforceError> {
        self.validate_until(graph, |_| token.is_cancelled())
    }

    /// Sequential pass that asks `stop` before each declaration, passing the
    /// number of declarations analyzed so far.
    pub(crate) fn validate_until(
        &self,
        graph: &TypeGraph,
        mut stop: impl FnMut(usize) -> bool,
    ) -> Result<Vec<Diagnostic>, EnforceError> {
        let ctx = RuleContext::new(graph, &self.config);
        let mut diagnostics = Vec::new();
        for (analyzed, decl) in graph.declarations().iter().enumerate() {
            if stop(analyzed) {
                tracing::debug!(types_analyzed = analyzed, "validation cancelled");
                return Err(EnforceError::Cancelled {
                    diagnostics,
                    types_analyzed: analyzed,
                });
            }
            diagnostics.extend(self.check_declaration(decl, &ctx));
        }
        Ok(diagnostics)
    }

    /// Validate declarations on the rayon pool. Output order matches `validate`.
    pub fn validate_parallel(&self, graph: &TypeGraph) -> Vec<Diagnostic> {
        let ctx = RuleContext::new(graph, &self.config);
        let per_type: Vec<Vec<Diagnostic>> = graph
            .declarations()
            .par_iter()
            .map(|decl| self.check_declaration(decl, &ctx))
            .collect();
        per_type.into_iter().flatten().collect()
    }

    /// Run a full pass and wrap the result for output.
    pub fn run(&self, graph: &TypeGraph) -> ValidationResult {
        let diagnostics = if self.config.parallel {
            self.validate_parallel(graph)
        } else {
            self.validate(graph)
        };
        build_result(diagnostics, graph.len())
    }

    /// Fix states for every unsuppressed diagnostic.
    pub fn fix(&self, graph: &TypeGraph, diagnostics: &[Diagnostic]) -> FixResult {
        let targets: Vec<&Diagnostic> = diagnostics.iter().filter(|d| !d.suppressed).collect();
        let plans = fix_generator::generate_fix_plans(&targets, graph, &self.config);
        let fixes_available = plans
            .iter()
            .filter(|p| matches!(p, FixState::FixAvailable(_)))
            .count() as u32;
        FixResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "fix".to_string(),
            fixes_available,
            plans,
        }
    }

    fn check_declaration(&self, decl: &TypeDeclaration, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = violations::check_type(decl, ctx)
            .into_iter()
            .map(|d| self.suppressions.apply(d))
            .collect();
        tracing::debug!(
            type_name = %decl.name,
            markers = decl.attributes.len(),
            diagnostics = diagnostics.len(),
            "analyzed type"
        );
        diagnostics
    }
}

/// Validate `graph` with the default configuration.
pub fn validate(graph: &TypeGraph) -> Vec<Diagnostic> {
    ValidationEngine::new().validate(graph)
}

pub fn build_result(diagnostics: Vec<Diagnostic>, types_analyzed: usize) -> ValidationResult {
    let summary = ValidationSummary::from_diagnostics(&diagnostics);
    let status = if summary.errors > 0 {
        "error"
    } else if summary.warnings > 0 {
        "warning"
    } else {
        "ok"
    };
    ValidationResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "check".to_string(),
        status: status.to_string(),
        types_analyzed: types_analyzed as u32,
        diagnostics,
        summary,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
