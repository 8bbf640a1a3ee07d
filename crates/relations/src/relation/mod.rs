//! Advisor/advisee relation derivation
//!
//! Resolves name references of a canonical collection into id edges

mod graph;
mod index;
mod resolver;

pub use graph::{AdvisorEdge, RelationGraph};
pub use index::NameIndex;
pub use resolver::{check_id_sequence, resolve_relations, ReferenceWarning, Resolution};

use lineage_common::RelationEntry;
use serde::{Deserialize, Serialize};

/// Shape of a resolved graph, for run reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSummary {
    /// Number of relation entries
    pub records: usize,

    /// Number of advisor edges
    pub edges: usize,

    /// Records with no resolved advisor
    pub roots: usize,

    /// Records with no edge at all
    pub isolated: usize,

    /// Largest advisor + advisee count of any record
    pub max_degree: usize,

    /// References that were unresolved or ambiguous
    pub warnings: usize,
}

impl RelationSummary {
    pub fn of(resolution: &Resolution) -> Self {
        let graph = RelationGraph::from_entries(&resolution.entries);
        Self {
            records: graph.node_count(),
            edges: graph.edge_count(),
            roots: graph.roots().len(),
            isolated: graph.isolated().len(),
            max_degree: resolution
                .entries
                .iter()
                .map(RelationEntry::degree)
                .max()
                .unwrap_or(0),
            warnings: resolution.warnings.len(),
        }
    }
}
