//! Tarjan's algorithm for strongly connected components.
//!
//! Finds all SCCs of a [`Graph`] in O(V + E) time. Components come out in
//! reverse topological order of the condensation graph (sinks first), each
//! one listed in stack-pop order with its root last.
//!
//! The depth-first search runs on an explicit frame stack instead of the call
//! stack, so arbitrarily long paths do not overflow. Each frame remembers how
//! far through its successor list it got, and a finished child's lowlink is
//! folded into its parent exactly where the recursive formulation would do it.

use std::hash::Hash;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

use super::graph::Graph;
use super::trace::{Action, Snapshot, TraceSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VertexState {
    index: usize,
    lowlink: usize,
    on_stack: bool,
}

/// Resume point of one vertex on the current DFS path.
struct Frame<'g, V> {
    vertex: usize,
    successors: &'g [V],
    next_successor: usize,
}

/// One state-changing step. Vertices are referred to by discovery index.
enum Step {
    Init(usize),
    PostRecursion { vertex: usize, child: usize },
    BackEdge { vertex: usize, target: usize },
    ComponentFound { root: usize, component: usize },
    Finished,
}

/// All mutable state of a single run. Never shared between runs.
struct TarjanRun<'g, V: Hash + Eq> {
    graph: &'g Graph<V>,
    roots: indexmap::map::Keys<'g, V, Vec<V>>,
    // discovery index doubles as the slot into `vertices` and `states`
    slots: FxHashMap<&'g V, usize>,
    vertices: Vec<&'g V>,
    states: Vec<VertexState>,
    stack: Vec<usize>,
    frames: Vec<Frame<'g, V>>,
    returned: Option<usize>,
    components: Vec<Vec<V>>,
    finished: bool,
}

impl<'g, V: Clone + Hash + Eq> TarjanRun<'g, V> {
    fn new(graph: &'g Graph<V>) -> TarjanRun<'g, V> {
        TarjanRun {
            graph,
            roots: graph.vertices(),
            slots: FxHashMap::default(),
            vertices: Vec::new(),
            states: Vec::new(),
            stack: Vec::new(),
            frames: Vec::new(),
            returned: None,
            components: Vec::new(),
            finished: false,
        }
    }

    fn discover(&mut self, vertex: &'g V) -> usize {
        let graph = self.graph;
        let index = self.vertices.len();
        self.slots.insert(vertex, index);
        self.vertices.push(vertex);
        self.states.push(VertexState {
            index,
            lowlink: index,
            on_stack: true,
        });
        self.stack.push(index);
        self.frames.push(Frame {
            vertex: index,
            successors: graph.successors(vertex),
            next_successor: 0,
        });
        index
    }

    fn lower(&mut self, vertex: usize, value: usize) {
        let state = &mut self.states[vertex];
        state.lowlink = state.lowlink.min(value);
        debug_assert!(state.lowlink <= state.index);
    }

    fn pop_component(&mut self, root: usize) -> usize {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.states[member].on_stack = false;
            component.push(self.vertices[member].clone());
            if member == root {
                break;
            }
        }
        debug_assert!(!self.states[root].on_stack, "component root was not on the stack");
        tracing::trace!(root = root, size = component.len(), "closed component");
        self.components.push(component);
        self.components.len() - 1
    }

    fn next_root(&mut self) -> Option<Step> {
        while let Some(root) = self.roots.next() {
            if !self.slots.contains_key(root) {
                return Some(Step::Init(self.discover(root)));
            }
        }
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(Step::Finished)
    }

    /// Performs work up to and including the next state-changing step.
    fn advance(&mut self) -> Option<Step> {
        if let Some(child) = self.returned.take() {
            if let Some(parent) = self.frames.last().map(|frame| frame.vertex) {
                let lowlink = self.states[child].lowlink;
                self.lower(parent, lowlink);
                return Some(Step::PostRecursion { vertex: parent, child });
            }
        }

        loop {
            let Some(frame) = self.frames.last_mut() else {
                return self.next_root();
            };
            let vertex = frame.vertex;
            let successors = frame.successors;

            if let Some(successor) = successors.get(frame.next_successor) {
                frame.next_successor += 1;
                match self.slots.get(successor).copied() {
                    None => return Some(Step::Init(self.discover(successor))),
                    Some(target) if self.states[target].on_stack => {
                        // index, not lowlink: the target is an open ancestor
                        let index = self.states[target].index;
                        self.lower(vertex, index);
                        return Some(Step::BackEdge { vertex, target });
                    }
                    // cross-edge into a closed component
                    Some(_) => continue,
                }
            }

            self.frames.pop();
            let state = self.states[vertex];
            if state.lowlink == state.index {
                let component = self.pop_component(vertex);
                self.returned = Some(vertex);
                return Some(Step::ComponentFound { root: vertex, component });
            }

            // Only a DFS tree root can lack a parent, and a tree root always closes a component.
            if let Some(parent) = self.frames.last().map(|frame| frame.vertex) {
                self.lower(parent, state.lowlink);
                return Some(Step::PostRecursion { vertex: parent, child: vertex });
            }
        }
    }

    fn snapshot(&self, step: &Step, universe: &[&'g V]) -> Snapshot<V> {
        let vertex = |id: usize| self.vertices[id].clone();
        let (current, action) = match *step {
            Step::Init(v) => (Some(v), Action::Init),
            Step::PostRecursion { vertex: v, child } => {
                (Some(v), Action::PostRecursion { child: vertex(child) })
            }
            Step::BackEdge { vertex: v, target } => {
                (Some(v), Action::BackEdge { target: vertex(target) })
            }
            Step::ComponentFound { root, component } => (
                Some(root),
                Action::ComponentFound {
                    component: self.components[component].clone(),
                },
            ),
            Step::Finished => (None, Action::Finished),
        };

        let state_of = |v: &V| self.slots.get(v).map(|&id| self.states[id]);
        Snapshot {
            current: current.map(vertex),
            action,
            stack: self.stack.iter().map(|&id| vertex(id)).collect(),
            indices: universe
                .iter()
                .map(|&v| (v.clone(), state_of(v).map(|s| s.index)))
                .collect(),
            lowlinks: universe
                .iter()
                .map(|&v| (v.clone(), state_of(v).map(|s| s.lowlink)))
                .collect(),
        }
    }

    fn finish(self) -> Vec<Vec<V>> {
        debug!(
            discovered = self.vertices.len(),
            components = self.components.len(),
            "tarjan run complete"
        );
        self.components
    }
}

/// Partitions the graph into strongly connected components, sinks first.
pub fn find_components<V: Clone + Hash + Eq>(graph: &Graph<V>) -> Vec<Vec<V>> {
    let _span = debug_span!("find_components", vertices = graph.len()).entered();
    let mut run = TarjanRun::new(graph);
    while run.advance().is_some() {}
    run.finish()
}

/// Same as [`find_components`], recording a [`Snapshot`] after every step.
pub fn find_components_with_sink<V, S>(graph: &Graph<V>, sink: &mut S) -> Vec<Vec<V>>
where
    V: Clone + Hash + Eq,
    S: TraceSink<V>,
{
    let _span = debug_span!("find_components_with_sink", vertices = graph.len()).entered();
    let mut trace = trace(graph);
    for snapshot in trace.by_ref() {
        sink.record(snapshot);
    }
    trace.into_components()
}

/// Runs every graph on its own worker. Each run is sequential and owns its state.
pub fn find_components_par<V>(graphs: &[Graph<V>]) -> Vec<Vec<Vec<V>>>
where
    V: Clone + Hash + Eq + Send + Sync,
{
    graphs.par_iter().map(|graph| find_components(graph)).collect()
}

/// Lazily produced sequence of run states.
pub struct Trace<'g, V: Hash + Eq> {
    run: TarjanRun<'g, V>,
    universe: Vec<&'g V>,
}

pub fn trace<V: Clone + Hash + Eq>(graph: &Graph<V>) -> Trace<'_, V> {
    Trace {
        run: TarjanRun::new(graph),
        universe: graph.all_vertices().into_iter().collect(),
    }
}

impl<'g, V: Clone + Hash + Eq> Trace<'g, V> {
    /// Components closed so far. Complete once the iterator is exhausted.
    pub fn components(&self) -> &[Vec<V>] {
        &self.run.components
    }

    /// Drains any remaining steps without building snapshots.
    pub fn into_components(mut self) -> Vec<Vec<V>> {
        while self.run.advance().is_some() {}
        self.run.finish()
    }
}

impl<'g, V: Clone + Hash + Eq> Iterator for Trace<'g, V> {
    type Item = Snapshot<V>;

    fn next(&mut self) -> Option<Snapshot<V>> {
        let step = self.run.advance()?;
        Some(self.run.snapshot(&step, &self.universe))
    }
}
