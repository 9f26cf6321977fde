use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Find the strongly connected components of a directed graph.
#[derive(Parser, Debug, Clone)]
#[command(name = "tarjan-scc", version, about)]
pub struct Args {
    /// Adjacency file with one `vertex: successors...` line per vertex.
    /// Reads stdin when absent or `-`.
    pub input: Option<PathBuf>,

    /// Print every intermediate algorithm state before the components.
    #[arg(long)]
    pub trace: bool,

    /// When to color vertices in trace output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorChoice::Auto => is_tty,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
