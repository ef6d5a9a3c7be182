//! Capability and inheritance queries over a `TypeGraph`.
//!
//! Capabilities are reached through `Implements` edges, transitively through
//! base types and extended interfaces. Failure-type checks walk `base` chains.

use std::collections::{HashSet, VecDeque};

use petgraph::visit::EdgeRef;

use crate::graph::{Relation, TypeGraph};
use crate::types::{simple_name, TypeDeclaration};

/// Answers capability and inheritance questions against one graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityResolver<'g> {
    graph: &'g TypeGraph,
}

impl<'g> CapabilityResolver<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self { graph }
    }

    /// True if `decl` implements `capability` directly, through an interface
    /// that extends it, or through any ancestor in its base-type chain.
    ///
    /// Breadth-first over `Implements` and `Inherits` edges. Only nodes reached
    /// through an `Implements` edge count as capabilities. Names are compared
    /// by their simple form.
    pub fn has_capability(&self, decl: &TypeDeclaration, capability: &str) -> bool {
        let wanted = simple_name(capability);
        let Some(start) = self.graph.node(&decl.name) else {
            // Not part of this graph: fall back to what it declares itself.
            return decl.declares_capability(capability);
        };

        let graph = self.graph.graph();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for edge in graph.edges(node) {
                let target = edge.target();
                if *edge.weight() == Relation::Implements && simple_name(&graph[target]) == wanted {
                    return true;
                }
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }
        false
    }

    /// Walk the base-type chain of `type_name` looking for `base`.
    ///
    /// Returns `Some(true)` when the chain reaches `base`, `Some(false)` when it
    /// ends without reaching it, and `None` when the chain is broken: an
    /// ancestor is not declared in the graph, or the chain loops.
    pub fn inherits_from(&self, type_name: &str, base: &str) -> Option<bool> {
        let mut current = type_name;
        let mut seen: HashSet<&str> = HashSet::new();
        loop {
            if current == base {
                return Some(true);
            }
            if !seen.insert(current) {
                tracing::warn!(type_name, "cyclic base-type chain");
                return None;
            }
            let Some(decl) = self.graph.get(current) else {
                tracing::debug!(type_name, missing = current, "base chain leaves the graph");
                return None;
            };
            match decl.base.as_deref() {
                Some(next) => current = next,
                None => return Some(false),
            }
        }
    }
}
