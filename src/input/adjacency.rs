//! Line-oriented adjacency text.
//!
//! ```text
//! # comment
//! A: B
//! B: C D
//! C: A
//! E:
//! ```
//!
//! Each line declares one vertex and its successors in order. A successor
//! without its own line is a target-only vertex.

use thiserror::Error;

use crate::scc::Graph;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected `vertex: successors...`")]
    MissingSeparator { line: usize },

    #[error("line {line}: vertex name is empty")]
    EmptyVertex { line: usize },

    #[error("line {line}: vertex `{vertex}` is declared twice")]
    DuplicateVertex { line: usize, vertex: String },
}

pub fn parse_adjacency(source: &str) -> Result<Graph<String>, ParseError> {
    let mut graph = Graph::new();
    for (number, raw) in source.lines().enumerate() {
        let line = number + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let (vertex, successors) = content
            .split_once(':')
            .ok_or(ParseError::MissingSeparator { line })?;
        let vertex = vertex.trim().to_string();
        if vertex.is_empty() {
            return Err(ParseError::EmptyVertex { line });
        }
        if !graph.add_vertex(vertex.clone()) {
            return Err(ParseError::DuplicateVertex { line, vertex });
        }
        for successor in successors.split_whitespace() {
            graph.add_edge(vertex.clone(), successor.to_string());
        }
    }
    Ok(graph)
}
