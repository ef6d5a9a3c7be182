pub mod check;
pub mod explain;
pub mod fix;
pub mod rules;

use std::path::Path;

use sagaguard_core::config::SagaGuardConfig;
use sagaguard_core::graph::TypeGraph;

/// Load the type graph for `cmd`, reporting failures on stderr.
pub(crate) fn load_graph(cmd: &str, path: &Path) -> Option<TypeGraph> {
    match TypeGraph::load(path) {
        Ok(graph) => {
            tracing::debug!(path = %path.display(), types = graph.len(), "loaded type graph");
            Some(graph)
        }
        Err(e) => {
            eprintln!(
                "sagaguard {}: failed to load type graph {}: {}",
                cmd,
                path.display(),
                e
            );
            None
        }
    }
}

/// Print formatter output, ending with exactly one newline. Empty output prints nothing.
pub(crate) fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

pub(crate) fn load_config(config_dir: &Path) -> SagaGuardConfig {
    let config = SagaGuardConfig::load(config_dir);
    tracing::debug!(
        dir = %config_dir.display(),
        suppress = config.suppress.len(),
        parallel = config.parallel,
        "loaded configuration"
    );
    config
}
