//! Directed attributed graph.
//!
//! Replaces a general-purpose multigraph with exactly what the generators
//! need: insertion-ordered nodes and edges (so a fixed seed reproduces the
//! exact same iteration order), optional numeric feature vectors on both, and
//! a hard invariant that no `(source, relation, target)` triple occurs twice.
//! Different relations between the same node pair are fine.

use crate::entity::EntityType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node: category label, optional fixed-length feature vector, optional
/// generator-specific annotation (e.g. the taste attribute sampled for a
/// `user` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub category: EntityType,
    #[serde(default)]
    pub features: Option<Vec<f64>>,
    #[serde(default)]
    pub annotation: Option<String>,
}

impl Node {
    pub fn new(category: EntityType) -> Self {
        Self {
            category,
            features: None,
            annotation: None,
        }
    }

    pub fn with_features(mut self, features: Vec<f64>) -> Self {
        self.features = Some(features);
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// A directed labeled edge with an optional feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: String,
    #[serde(default)]
    pub features: Option<Vec<f64>>,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
            features: None,
        }
    }

    pub fn with_features(mut self, features: Vec<f64>) -> Self {
        self.features = Some(features);
        self
    }

    /// The `(head, relation, tail)` view of this edge.
    pub fn triple(&self) -> (String, String, String) {
        (
            self.source.clone(),
            self.relation.clone(),
            self.target.clone(),
        )
    }
}

/// Directed attributed graph with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    triple_keys: HashSet<(String, String, String)>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node.
    pub fn add_node(&mut self, id: impl Into<String>, node: Node) {
        self.nodes.insert(id.into(), node);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids of one category, in insertion order.
    pub fn nodes_of_category(&self, category: EntityType) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.category == category)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Insert an edge. Returns `false` (and leaves the graph unchanged) when
    /// the exact `(source, relation, target)` triple is already present.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let key = (
            edge.source.clone(),
            edge.relation.clone(),
            edge.target.clone(),
        );
        if !self.triple_keys.insert(key) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn has_edge(&self, source: &str, relation: &str, target: &str) -> bool {
        self.triple_keys.contains(&(
            source.to_string(),
            relation.to_string(),
            target.to_string(),
        ))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Targets of edges `source --relation--> *`, in insertion order.
    pub fn successors(&self, source: &str, relation: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == source && e.relation == relation)
            .map(|e| e.target.as_str())
            .collect()
    }

    /// Sources of edges `* --relation--> target`, in insertion order.
    pub fn predecessors(&self, target: &str, relation: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.target == target && e.relation == relation)
            .map(|e| e.source.as_str())
            .collect()
    }

    /// Absorb another graph's nodes and edges (duplicate triples are
    /// dropped, matching the insert invariant).
    pub fn extend_from(&mut self, other: DirectedGraph) {
        for (id, node) in other.nodes {
            self.nodes.insert(id, node);
        }
        for edge in other.edges {
            self.add_edge(edge);
        }
    }
}

impl PartialEq for DirectedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

// The triple-key set is derived state; snapshots carry only nodes and edges
// and rebuild the set on the way in.

#[derive(Serialize)]
struct GraphPartsRef<'a> {
    nodes: &'a IndexMap<String, Node>,
    edges: &'a [Edge],
}

#[derive(Deserialize)]
struct GraphParts {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl Serialize for DirectedGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphPartsRef {
            nodes: &self.nodes,
            edges: &self.edges,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DirectedGraph {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = GraphParts::deserialize(deserializer)?;
        let mut graph = DirectedGraph {
            nodes: parts.nodes,
            edges: Vec::with_capacity(parts.edges.len()),
            triple_keys: HashSet::with_capacity(parts.edges.len()),
        };
        for edge in parts.edges {
            graph.add_edge(edge);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_graph() -> DirectedGraph {
        let mut g = DirectedGraph::new();
        g.add_node("uni-0", Node::new(EntityType::University));
        g.add_node("st-0-0", Node::new(EntityType::Student));
        g.add_node("st-0-1", Node::new(EntityType::Student));
        g.add_edge(Edge::new("uni-0", "st-0-0", "enrolls"));
        g.add_edge(Edge::new("uni-0", "st-0-1", "enrolls"));
        g
    }

    #[test]
    fn duplicate_triples_are_rejected() {
        let mut g = tiny_graph();
        assert!(!g.add_edge(Edge::new("uni-0", "st-0-0", "enrolls")));
        assert_eq!(g.edge_count(), 2);
        // Same pair, different relation is allowed.
        assert!(g.add_edge(Edge::new("uni-0", "st-0-0", "mentors")));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn successors_and_predecessors_filter_by_relation() {
        let g = tiny_graph();
        assert_eq!(g.successors("uni-0", "enrolls"), vec!["st-0-0", "st-0-1"]);
        assert_eq!(g.successors("uni-0", "collaborates_with"), Vec::<&str>::new());
        assert_eq!(g.predecessors("st-0-1", "enrolls"), vec!["uni-0"]);
    }

    #[test]
    fn category_filter_keeps_insertion_order() {
        let g = tiny_graph();
        assert_eq!(
            g.nodes_of_category(EntityType::Student),
            vec!["st-0-0", "st-0-1"]
        );
        assert_eq!(g.nodes_of_category(EntityType::Friend), Vec::<&str>::new());
    }

    #[test]
    fn serde_round_trip_rebuilds_triple_index() {
        let g = tiny_graph();
        let json = serde_json::to_string(&g).unwrap();
        let back: DirectedGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(back.has_edge("uni-0", "enrolls", "st-0-0"));
        let mut back = back;
        assert!(!back.add_edge(Edge::new("uni-0", "st-0-0", "enrolls")));
    }
}
