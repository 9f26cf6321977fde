//! Observational records of a Tarjan run.
//!
//! A [`Snapshot`] is taken after every state-changing step: vertex
//! initialisation, the lowlink fold after a tree edge returns, a back-edge,
//! and a component closing. Cross-edges change nothing and are not recorded.
//! A final [`Action::Finished`] record closes the sequence.

use std::fmt;
use std::hash::Hash;

use itertools::Itertools;

use super::graph::FxIndexMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<V> {
    Init,
    /// The child's lowlink has been folded into the current vertex.
    PostRecursion { child: V },
    BackEdge { target: V },
    /// Members in pop order, root last.
    ComponentFound { component: Vec<V> },
    Finished,
}

impl<V: fmt::Display> fmt::Display for Action<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Init => write!(f, "init"),
            Action::PostRecursion { child } => write!(f, "post-recursion to {child}"),
            Action::BackEdge { target } => write!(f, "back-edge to {target}"),
            Action::ComponentFound { component } => {
                write!(f, "found SCC [{}]", component.iter().join(", "))
            }
            Action::Finished => write!(f, "finished"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexStatus {
    Current,
    OnStack,
    Visited,
    Unvisited,
}

/// State of a run right after one step.
///
/// `indices` and `lowlinks` cover every vertex of the graph, declared or
/// target-only; `None` means the vertex has not been discovered yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<V: Hash + Eq> {
    pub current: Option<V>,
    pub action: Action<V>,
    /// Bottom to top.
    pub stack: Vec<V>,
    pub indices: FxIndexMap<V, Option<usize>>,
    pub lowlinks: FxIndexMap<V, Option<usize>>,
}

impl<V: Hash + Eq> Snapshot<V> {
    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.indices.get(vertex).copied().flatten()
    }

    pub fn lowlink_of(&self, vertex: &V) -> Option<usize> {
        self.lowlinks.get(vertex).copied().flatten()
    }

    pub fn status(&self, vertex: &V) -> VertexStatus {
        if self.current.as_ref() == Some(vertex) {
            VertexStatus::Current
        } else if self.stack.contains(vertex) {
            VertexStatus::OnStack
        } else if self.index_of(vertex).is_some() {
            VertexStatus::Visited
        } else {
            VertexStatus::Unvisited
        }
    }
}

pub trait TraceSink<V: Hash + Eq> {
    fn record(&mut self, snapshot: Snapshot<V>);
}

impl<V: Hash + Eq> TraceSink<V> for Vec<Snapshot<V>> {
    fn record(&mut self, snapshot: Snapshot<V>) {
        self.push(snapshot);
    }
}

/// Adapts a closure into a [`TraceSink`].
pub struct FnSink<F>(pub F);

impl<V: Hash + Eq, F: FnMut(Snapshot<V>)> TraceSink<V> for FnSink<F> {
    fn record(&mut self, snapshot: Snapshot<V>) {
        (self.0)(snapshot)
    }
}

/// Rebuilds the completed components from stack snapshots alone.
///
/// The stack only shrinks when a component closes, and what disappears is
/// that component in reverse pop order.
pub fn replay_components<V: Clone + Hash + Eq>(snapshots: &[Snapshot<V>]) -> Vec<Vec<V>> {
    let mut components = Vec::new();
    let mut previous: &[V] = &[];
    for snapshot in snapshots {
        let stack = snapshot.stack.as_slice();
        if stack.len() < previous.len() {
            debug_assert!(previous.starts_with(stack), "stack shrank without popping its top");
            components.push(previous[stack.len()..].iter().rev().cloned().collect());
        }
        previous = stack;
    }
    components
}
