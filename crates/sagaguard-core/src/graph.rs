//! Immutable type declaration graph supplied by the host for one analysis pass.
//!
//! Declarations are indexed by qualified name. A `petgraph` digraph holds the
//! adjacency used by capability resolution: `Implements` edges from a type to
//! each declared capability (and from an interface to the interfaces it
//! extends), `Inherits` edges from a type to its base type. Names that are
//! referenced but never declared become leaf nodes.

use std::collections::HashMap;
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::types::{GraphError, TypeDeclaration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Implements,
    Inherits,
}

/// On-disk shape of a type graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeGraphDocument {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone)]
pub struct TypeGraph {
    declarations: Vec<TypeDeclaration>,
    by_name: HashMap<String, usize>,
    graph: DiGraph<String, Relation>,
    nodes: HashMap<String, NodeIndex>,
}

impl TypeGraph {
    /// Build a graph from declarations in source order.
    pub fn new(declarations: Vec<TypeDeclaration>) -> Result<Self, GraphError> {
        let mut by_name = HashMap::with_capacity(declarations.len());
        for (i, decl) in declarations.iter().enumerate() {
            if by_name.insert(decl.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateType(decl.name.clone()));
            }
        }

        let mut graph = DiGraph::new();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
        let mut node_for = |graph: &mut DiGraph<String, Relation>, name: &str| -> NodeIndex {
            *nodes
                .entry(name.to_string())
                .or_insert_with(|| graph.add_node(name.to_string()))
        };

        for decl in &declarations {
            let from = node_for(&mut graph, &decl.name);
            for cap in &decl.capabilities {
                let to = node_for(&mut graph, cap);
                graph.add_edge(from, to, Relation::Implements);
            }
            if let Some(base) = &decl.base {
                let to = node_for(&mut graph, base);
                graph.add_edge(from, to, Relation::Inherits);
            }
        }

        Ok(Self {
            declarations,
            by_name,
            graph,
            nodes,
        })
    }

    pub fn from_document(doc: TypeGraphDocument) -> Result<Self, GraphError> {
        Self::new(doc.types)
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let doc: TypeGraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Load a graph document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_document(&self) -> TypeGraphDocument {
        TypeGraphDocument {
            types: self.declarations.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Declarations in source order.
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.declarations
    }

    pub fn get(&self, name: &str) -> Option<&TypeDeclaration> {
        self.by_name.get(name).map(|&i| &self.declarations[i])
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub(crate) fn node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    pub(crate) fn graph(&self) -> &DiGraph<String, Relation> {
        &self.graph
    }

    /// Consume the graph, returning its declarations for rebuilding.
    pub fn into_declarations(self) -> Vec<TypeDeclaration> {
        self.declarations
    }
}
