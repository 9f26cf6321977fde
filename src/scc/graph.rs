use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Directed graph as an insertion-ordered adjacency mapping.
///
/// Only declared keys are iterated as roots. A vertex that appears solely as an
/// edge target has no outgoing edges and is reached through edge traversal.
#[derive(Clone, Debug)]
pub struct Graph<V: Hash + Eq> {
    adjacency: FxIndexMap<V, Vec<V>>,
}

impl<V: Hash + Eq> Default for Graph<V> {
    fn default() -> Self {
        Graph {
            adjacency: FxIndexMap::default(),
        }
    }
}

impl<V: Clone + Hash + Eq> Graph<V> {
    pub fn new() -> Graph<V> {
        Graph::default()
    }

    /// Builds a graph from `(vertex, successors)` pairs. A key seen again
    /// appends to the successors it already has.
    pub fn from_adjacency<I, S>(adjacency: I) -> Graph<V>
    where
        I: IntoIterator<Item = (V, S)>,
        S: IntoIterator<Item = V>,
    {
        let mut graph = Graph::new();
        for (vertex, successors) in adjacency {
            graph.adjacency.entry(vertex).or_default().extend(successors);
        }
        graph
    }

    /// Builds a graph from an edge list, declaring both endpoints of every edge.
    pub fn from_edges<I>(edges: I) -> Graph<V>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Graph::new();
        for (from, to) in edges {
            graph.add_edge(from, to.clone());
            graph.add_vertex(to);
        }
        graph
    }

    /// Returns true when the vertex was not declared before.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, Vec::new());
        true
    }

    pub fn add_edge(&mut self, from: V, to: V) {
        self.adjacency.entry(from).or_default().push(to);
    }

    pub fn successors(&self, vertex: &V) -> &[V] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Declared vertices in insertion order.
    pub fn vertices(&self) -> indexmap::map::Keys<V, Vec<V>> {
        self.adjacency.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<V, Vec<V>> {
        self.adjacency.iter()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Declared vertices followed by target-only vertices, each once, in first-appearance order.
    pub fn all_vertices(&self) -> FxIndexSet<&V> {
        let mut all: FxIndexSet<&V> = self.adjacency.keys().collect();
        for successors in self.adjacency.values() {
            all.extend(successors.iter());
        }
        all
    }
}

impl<V: Clone + Hash + Eq> FromIterator<(V, Vec<V>)> for Graph<V> {
    fn from_iter<T: IntoIterator<Item = (V, Vec<V>)>>(iter: T) -> Self {
        Graph::from_adjacency(iter)
    }
}
