//! Advisor graph representation
//!
//! Read-only view over resolved relation entries, keyed by researcher id.

use lineage_common::RelationEntry;
use std::collections::HashMap;

/// Edge in the advisor graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorEdge {
    /// Advisor id
    pub advisor: u32,

    /// Advisee id
    pub advisee: u32,
}

/// In-memory advisor graph
pub struct RelationGraph {
    /// Adjacency list: id -> its advisors
    advisors: HashMap<u32, Vec<u32>>,

    /// Reverse adjacency: id -> its advisees
    advisees: HashMap<u32, Vec<u32>>,

    /// All ids, in collection order
    nodes: Vec<u32>,
}

impl RelationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            advisors: HashMap::new(),
            advisees: HashMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Build from relation entries. Both directions are taken as given.
    pub fn from_entries(entries: &[RelationEntry]) -> Self {
        let mut graph = Self::new();
        for entry in entries {
            graph.nodes.push(entry.id);
            graph.advisors.insert(entry.id, entry.advisors.clone());
            graph.advisees.insert(entry.id, entry.advisees.clone());
        }
        graph
    }

    /// Ids of the advisors of `id`
    pub fn advisors_of(&self, id: u32) -> &[u32] {
        self.advisors.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Ids of the advisees of `id`
    pub fn advisees_of(&self, id: u32) -> &[u32] {
        self.advisees.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &u32> {
        self.nodes.iter()
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every advisor → advisee edge, ordered by advisee
    pub fn edges(&self) -> impl Iterator<Item = AdvisorEdge> + '_ {
        self.nodes.iter().flat_map(move |&advisee| {
            self.advisors_of(advisee)
                .iter()
                .map(move |&advisor| AdvisorEdge { advisor, advisee })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.advisors.values().map(Vec::len).sum()
    }

    /// Records with no resolved advisor: the tops of lineages
    pub fn roots(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .copied()
            .filter(|&id| self.advisors_of(id).is_empty())
            .collect()
    }

    /// Records with neither advisors nor advisees
    pub fn isolated(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .copied()
            .filter(|&id| self.advisors_of(id).is_empty() && self.advisees_of(id).is_empty())
            .collect()
    }

    /// Edges present in one direction but missing from the other
    pub fn asymmetries(&self) -> Vec<AdvisorEdge> {
        let mut broken: Vec<AdvisorEdge> = self
            .edges()
            .filter(|e| !self.advisees_of(e.advisor).contains(&e.advisee))
            .collect();

        for &advisor in &self.nodes {
            for &advisee in self.advisees_of(advisor) {
                if !self.advisors_of(advisee).contains(&advisor) {
                    broken.push(AdvisorEdge { advisor, advisee });
                }
            }
        }
        broken
    }

    pub fn is_symmetric(&self) -> bool {
        self.asymmetries().is_empty()
    }
}

impl Default for RelationGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, advisors: &[u32], advisees: &[u32]) -> RelationEntry {
        RelationEntry {
            id,
            advisors: advisors.to_vec(),
            advisees: advisees.to_vec(),
        }
    }

    #[test]
    fn test_graph_construction() {
        // 1 advised 2, 2 advised 3
        let graph = RelationGraph::from_entries(&[
            entry(1, &[], &[2]),
            entry(2, &[1], &[3]),
            entry(3, &[2], &[]),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.advisees_of(1), &[2]);
        assert_eq!(graph.advisors_of(3), &[2]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.roots(), vec![1]);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_edges_and_isolated() {
        let graph = RelationGraph::from_entries(&[
            entry(1, &[], &[3]),
            entry(2, &[], &[]),
            entry(3, &[1], &[]),
        ]);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![AdvisorEdge { advisor: 1, advisee: 3 }]);
        assert_eq!(graph.isolated(), vec![2]);
        assert!(graph.advisors_of(99).is_empty());
    }

    #[test]
    fn test_asymmetry_detected() {
        let graph = RelationGraph::from_entries(&[entry(1, &[], &[]), entry(2, &[1], &[])]);
        assert_eq!(
            graph.asymmetries(),
            vec![AdvisorEdge { advisor: 1, advisee: 2 }]
        );
        assert!(!graph.is_symmetric());
    }
}
