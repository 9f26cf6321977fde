//! Strongly connected components with Tarjan's single-pass algorithm.

pub mod finder;
pub mod graph;
pub mod trace;

pub use finder::{find_components, find_components_par, find_components_with_sink, trace, Trace};
pub use graph::{FxIndexMap, FxIndexSet, Graph};
pub use trace::{replay_components, Action, FnSink, Snapshot, TraceSink, VertexStatus};
