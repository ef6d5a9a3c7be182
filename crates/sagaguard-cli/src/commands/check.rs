use std::path::Path;

use sagaguard_enforce::engine::ValidationEngine;
use sagaguard_output::OutputFormatter;

/// Run `sagaguard check`: validate a type graph.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    config_dir: &Path,
    graph_path: &Path,
    strict: bool,
    suppress: Vec<String>,
    parallel: bool,
) -> i32 {
    let Some(graph) = super::load_graph("check", graph_path) else {
        return 2;
    };

    let mut config = super::load_config(config_dir);
    config.parallel |= parallel;
    let mut engine = ValidationEngine::with_config(&config);
    // Unknown codes are logged by the suppression manager.
    for code in &suppress {
        engine.suppress(code);
    }

    let result = engine.run(&graph);

    super::emit(&formatter.format_check(&result));

    if verbose {
        eprintln!(
            "sagaguard check: {} type(s), {} error(s), {} suppressed",
            result.types_analyzed, result.summary.errors, result.summary.suppressed,
        );
    }

    let has_errors = result.summary.errors > 0;
    if has_errors || (strict && !result.diagnostics.is_empty()) {
        1
    } else {
        0
    }
}
