use std::fmt::Display;
use std::hash::Hash;

use crossterm::style::{style, Color, Stylize};
use itertools::Itertools;

use crate::scc::{Snapshot, VertexStatus};

fn status_color(status: VertexStatus) -> Option<Color> {
    match status {
        VertexStatus::Current => Some(Color::Red),
        VertexStatus::OnStack => Some(Color::DarkYellow),
        VertexStatus::Visited => Some(Color::Cyan),
        VertexStatus::Unvisited => None,
    }
}

fn paint(text: String, color: Option<Color>, enabled: bool) -> String {
    match color {
        Some(color) if enabled => style(text).with(color).to_string(),
        _ => text,
    }
}

fn label(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn component_to_string<V: Display>(component: &[V]) -> String {
    format!("{{{}}}", component.iter().join(", "))
}

pub fn snapshot_to_string<V: Display + Hash + Eq>(step: usize, snapshot: &Snapshot<V>, color: bool) -> String {
    let stack = if snapshot.stack.is_empty() {
        "-".to_string()
    } else {
        snapshot.stack.iter().join(", ")
    };
    let labels = snapshot
        .indices
        .keys()
        .map(|vertex| {
            let text = format!(
                "{vertex}(idx:{}, low:{})",
                label(snapshot.index_of(vertex)),
                label(snapshot.lowlink_of(vertex))
            );
            paint(text, status_color(snapshot.status(vertex)), color)
        })
        .join(" ");
    format!("step {step}: {}\n  stack: {stack}\n  {labels}", snapshot.action)
}
