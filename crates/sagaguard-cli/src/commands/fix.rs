use std::path::{Path, PathBuf};

use sagaguard_enforce::engine::ValidationEngine;
use sagaguard_enforce::fix_generator::apply_fixes;
use sagaguard_enforce::types::{FixApplyResult, FixSuggestion};
use sagaguard_output::OutputFormatter;

/// Run the `sagaguard fix` command.
///
/// Generates fix plans for diagnostics. Without --apply, outputs plans only.
/// With --apply, writes the fixed graph and re-validates it.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    config_dir: &Path,
    graph_path: &Path,
    apply: bool,
    output: Option<PathBuf>,
) -> i32 {
    let Some(graph) = super::load_graph("fix", graph_path) else {
        return 2;
    };

    let config = super::load_config(config_dir);
    let engine = ValidationEngine::with_config(&config);
    let diagnostics = engine.run(&graph).diagnostics;
    let result = engine.fix(&graph, &diagnostics);

    if !apply {
        super::emit(&formatter.format_fix(&result));
        if verbose {
            eprintln!(
                "sagaguard fix: {} plan(s), {} fixable",
                result.plans.len(),
                result.fixes_available,
            );
        }
        return 0;
    }

    // --apply mode: write the fixed graph, then re-validate
    let suggestions: Vec<FixSuggestion> = result
        .plans
        .iter()
        .filter_map(|p| p.suggestion().cloned())
        .collect();

    let fixed = match apply_fixes(&graph, &suggestions) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("sagaguard fix: failed to apply fixes: {}", e);
            return 2;
        }
    };
    let json = match fixed.to_json() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("sagaguard fix: failed to serialize fixed graph: {}", e);
            return 2;
        }
    };
    let target = output.unwrap_or_else(|| graph_path.to_path_buf());
    if let Err(e) = std::fs::write(&target, json) {
        eprintln!("sagaguard fix: failed to write {}: {}", target.display(), e);
        return 2;
    }
    tracing::debug!(path = %target.display(), fixes = suggestions.len(), "wrote fixed graph");

    let remaining = engine.run(&fixed);
    let exit_code = if remaining.summary.errors > 0 { 1 } else { 0 };

    let apply_result = FixApplyResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "fix".to_string(),
        fixes_applied: suggestions.len() as u32,
        output_path: target.display().to_string(),
        remaining,
    };
    super::emit(&formatter.format_fix_apply(&apply_result));
    exit_code
}
